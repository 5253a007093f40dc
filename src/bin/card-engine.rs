use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use card_engine::core::{GameConfig, GameRng, PlayerId};
use card_engine::render::{ConsoleRenderer, Renderer};
use card_engine::session::{run_automated, run_interactive, GameRegistry};

#[derive(Parser)]
#[command(version, about = "Play and simulate turn-based card games", long_about = None)]
struct Cli {
    /// JSON configuration file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered games.
    List,
    /// Play a game at the console.
    Play {
        game: String,
        #[command(flatten)]
        overrides: Overrides,
        /// Seats (0-based) played by a human; repeatable.
        #[arg(long = "human")]
        human_seats: Vec<usize>,
    },
    /// Run automated games and report win counts.
    Simulate {
        game: String,
        #[command(flatten)]
        overrides: Overrides,
        /// Number of games to run.
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
}

#[derive(Args)]
struct Overrides {
    /// Player names in seat order, comma separated.
    #[arg(long, value_delimiter = ',')]
    players: Vec<String>,
    /// Shuffle seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Deal the deck unshuffled.
    #[arg(long)]
    no_shuffle: bool,
    /// Stop automated play after this many turns.
    #[arg(long)]
    max_turns: Option<usize>,
    /// Pause between automated turns, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut GameConfig) {
        if !self.players.is_empty() {
            config.players = self.players;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_shuffle {
            config.shuffle = false;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path).with_context(|| format!("reading {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn list(registry: &GameRegistry) {
    for id in registry.ids() {
        println!("{:<10} {}", id, registry.description(id).unwrap_or_default());
    }
}

fn play(registry: &GameRegistry, config: &GameConfig) -> anyhow::Result<()> {
    let humans: Vec<PlayerId> = config
        .build_players()
        .into_iter()
        .map(|p| p.id)
        .filter(|id| config.is_human(id))
        .collect();
    let renderer = ConsoleRenderer::new(io::stdin().lock(), io::stdout()).revealing(humans);

    let mut session = registry.create(config, Box::new(renderer))?;
    session.start()?;

    let mut rng = match config.seed {
        Some(seed) => GameRng::new(seed).for_context("moves"),
        None => GameRng::from_entropy(),
    };
    let delay = Duration::from_millis(config.delay_ms);
    let summary = if config.human_seats.is_empty() {
        run_automated(session.as_mut(), &mut rng, config.max_turns, delay)?
    } else {
        let is_human = |id: &PlayerId| config.is_human(id);
        run_interactive(session.as_mut(), &is_human, &mut rng, config.max_turns, delay)?
    };

    log::info!(
        "{} turn(s) played, finished: {}, winners: {:?}",
        summary.turns,
        summary.finished,
        summary.winners
    );
    Ok(())
}

fn simulate(registry: &GameRegistry, config: &GameConfig, games: usize) -> anyhow::Result<()> {
    if games == 0 {
        bail!("--games must be positive");
    }
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let names: BTreeMap<_, _> = config.build_players().into_iter().map(|p| (p.id, p.name)).collect();
    let mut wins: BTreeMap<String, usize> = names.values().map(|name| (name.clone(), 0)).collect();
    let mut unfinished = 0;

    for game in 0..games {
        let seed = base_seed.wrapping_add(game as u64);
        let game_config = GameConfig {
            seed: Some(seed),
            ..config.clone()
        };
        let quiet: Box<dyn Renderer> = Box::new(ConsoleRenderer::new(io::empty(), io::sink()));
        let mut session = registry.create(&game_config, quiet)?;
        session.start()?;

        let mut rng = GameRng::new(seed).for_context("moves");
        let summary = run_automated(session.as_mut(), &mut rng, config.max_turns, Duration::ZERO)?;
        if !summary.finished {
            unfinished += 1;
            continue;
        }
        for winner in &summary.winners {
            if let Some(name) = names.get(winner) {
                *wins.entry(name.clone()).or_insert(0) += 1;
            }
        }
    }

    println!("{} game(s) of {} from seed {}", games, config.game, base_seed);
    for (name, count) in &wins {
        println!(
            "  {:<12} {:>6} win(s)  {:>5.1}%",
            name,
            count,
            *count as f64 * 100.0 / games as f64
        );
    }
    if unfinished > 0 {
        println!("  {} game(s) unfinished after {} turn(s)", unfinished, config.max_turns);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let registry = GameRegistry::with_builtin_games();

    match cli.command {
        Command::List => list(&registry),
        Command::Play {
            game,
            overrides,
            human_seats,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            config.game = game;
            overrides.apply(&mut config);
            if !human_seats.is_empty() {
                config.human_seats = human_seats;
            }
            config.validate()?;
            play(&registry, &config)?;
        }
        Command::Simulate {
            game,
            overrides,
            games,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            config.game = game;
            overrides.apply(&mut config);
            config.human_seats.clear();
            config.validate()?;
            simulate(&registry, &config, games)?;
        }
    }
    Ok(())
}
