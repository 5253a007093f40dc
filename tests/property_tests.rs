//! Property tests over random games.
//!
//! Each case builds a game with a random seed and table size, plays a
//! random number of random legal moves, then checks a structural property
//! of the engine. Games come from the registry unless the property needs
//! the typed engine.

use card_engine::core::{Card, GameConfig, GameRng, GameState, Player, PlayerId, Rank, Suit};
use card_engine::engine::Engine;
use card_engine::games::go_fish::{GoFishMove, GoFishRules};
use card_engine::games::war::{WarMove, WarRules};
use card_engine::render::RecordingRenderer;
use card_engine::rules::RulesEngine;
use card_engine::session::{play_auto_turn, GameRegistry, Session};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn any_game() -> impl Strategy<Value = (&'static str, usize)> {
    prop_oneof![Just(("war", 2)), (2usize..=5).prop_map(|n| ("go-fish", n))]
}

fn started(game: &str, players: usize, seed: u64) -> Box<dyn Session> {
    let config = GameConfig {
        game: game.to_string(),
        players: (1..=players).map(|i| format!("Player {}", i)).collect(),
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut session = GameRegistry::with_builtin_games()
        .create(&config, Box::new(RecordingRenderer::new()))
        .unwrap();
    session.start().unwrap();
    session
}

/// Play up to `moves` random moves. Returns the state after each accepted
/// move, the dealt state first.
fn play_random(session: &mut dyn Session, moves: usize, seed: u64) -> Vec<GameState> {
    let mut rng = GameRng::new(seed).for_context("moves");
    let mut states = vec![session.state().clone()];
    for _ in 0..moves {
        if session.is_finished() || !play_auto_turn(session, &mut rng).unwrap() {
            break;
        }
        states.push(session.state().clone());
    }
    states
}

fn seated<R: RulesEngine>(rules: R, players: usize) -> Engine<R, RecordingRenderer> {
    let mut engine = Engine::new(rules, RecordingRenderer::new());
    for seat in 1..=players {
        engine
            .add_player(Player::new(format!("p{}", seat), format!("Player {}", seat)))
            .unwrap();
    }
    engine.start().unwrap();
    engine
}

/// Offer a move under every id except the current player's, plus one id
/// nobody holds. Uses the current player's first legal move, or `fallback`
/// once none is left.
fn check_turn_discipline<R: RulesEngine + 'static>(
    engine: &mut Engine<R, RecordingRenderer>,
    moves: usize,
    seed: u64,
    fallback: R::Move,
) -> Result<(), TestCaseError> {
    play_random(engine, moves, seed);
    let current = engine.current_player_id();
    let mv = engine.legal_moves().into_iter().next().unwrap_or(fallback);
    let before = engine.state().clone();
    let played = engine.move_log().len();

    let mut others: Vec<PlayerId> = engine
        .state()
        .player_ids()
        .into_iter()
        .filter(|id| Some(id) != current.as_ref())
        .collect();
    others.push(PlayerId::new("nobody"));

    for id in others {
        prop_assert!(engine.play_move(&id, mv.clone()).is_err());
        prop_assert_eq!(engine.state(), &before);
        prop_assert_eq!(engine.move_log().len(), played);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cards_are_conserved((game, players) in any_game(), seed in any::<u64>(), moves in 0usize..80) {
        let mut session = started(game, players, seed);
        let expected = session.state().all_card_ids();
        prop_assert_eq!(expected.len(), 52);

        for state in play_random(session.as_mut(), moves, seed) {
            prop_assert_eq!(state.all_card_ids(), expected.clone());
        }
        if session.moves_played() > 0 {
            session.undo().unwrap();
            prop_assert_eq!(session.state().all_card_ids(), expected.clone());
        }
        session.restart().unwrap();
        prop_assert_eq!(session.state().all_card_ids(), expected);
    }

    #[test]
    fn current_player_is_always_seated((game, players) in any_game(), seed in any::<u64>(), moves in 0usize..80) {
        let mut session = started(game, players, seed);
        for state in play_random(session.as_mut(), moves, seed) {
            let current = state.current_player_id.clone();
            prop_assert!(current.is_some_and(|id| state.player_by_id(&id).is_some()));
            prop_assert!(state.round >= 1);
        }
    }

    #[test]
    fn non_current_player_is_rejected((game, players) in any_game(), seed in any::<u64>(), moves in 0usize..60) {
        if game == "war" {
            check_turn_discipline(&mut seated(WarRules::new(seed), players), moves, seed, WarMove::Play)?;
        } else {
            let fallback = GoFishMove::new("p1", Rank::Two);
            check_turn_discipline(&mut seated(GoFishRules::new(seed), players), moves, seed, fallback)?;
        }
    }

    #[test]
    fn undo_is_exact_inverse((game, players) in any_game(), seed in any::<u64>(), moves in 1usize..60) {
        let mut session = started(game, players, seed);
        let states = play_random(session.as_mut(), moves, seed);
        let played = states.len() - 1;
        prop_assume!(played > 0);

        for back in (0..played).rev() {
            session.undo().unwrap();
            prop_assert_eq!(session.state(), &states[back]);
            prop_assert_eq!(session.moves_played(), back);
            prop_assert!(!session.is_finished());
        }
        prop_assert!(session.undo().is_err());
    }

    #[test]
    fn restart_is_idempotent((game, players) in any_game(), seed in any::<u64>(), moves in 0usize..60) {
        let mut session = started(game, players, seed);
        let states = play_random(session.as_mut(), moves, seed);

        session.restart().unwrap();
        let once = session.state().clone();
        session.restart().unwrap();

        prop_assert_eq!(&once, &states[0]);
        prop_assert_eq!(session.state(), &once);
        prop_assert_eq!(session.moves_played(), 0);
    }

    #[test]
    fn rejected_moves_leave_no_history((game, players) in any_game(), seed in any::<u64>(), moves in 0usize..20) {
        let mut session = started(game, players, seed);
        let states = play_random(session.as_mut(), moves, seed);
        let played = states.len() - 1;
        let before = session.state().clone();

        let choices = session.move_labels().len();
        prop_assert!(session.play_choice(choices).is_err());
        prop_assert_eq!(session.state(), &before);
        prop_assert_eq!(session.moves_played(), played);
        prop_assert_eq!(session.undo().is_ok(), played > 0);
    }

    #[test]
    fn clones_are_independent((game, players) in any_game(), seed in any::<u64>(), moves in 0usize..30) {
        let mut session = started(game, players, seed);
        play_random(session.as_mut(), moves, seed);
        let original = session.state().clone();
        let mut copy = original.clone();

        copy.deck.add_to_top(Card::standard(Rank::Ace, Suit::Spades));
        copy.players[0].hand.add(Card::new("joker", "Joker"));
        copy.players[0].score += 100;
        copy.set_custom_state("scratch", true);
        copy.round += 1;

        prop_assert_ne!(&copy, &original);
        prop_assert_eq!(session.state(), &original);
        prop_assert!(original.custom_state("scratch").is_none());
    }
}
