//! End-to-end sessions through the application container.

mod common;

use common::at;
use kalaban::{
    Error,
    adapters::{InMemoryRepository, MsgPackRepository},
    app::{App, SessionConfig},
    pipeline::{DefensiveOpponent, EvaluationConfig, EvaluationPipeline, RandomOpponent},
    search::WinAttribution,
    selector::Difficulty,
    tictactoe::{Board, GameOutcome, LineKind, Player},
};
use tempfile::TempDir;

fn hard_config() -> SessionConfig {
    SessionConfig::new(Difficulty::Hard)
        .with_attribution(WinAttribution::PerBranch)
        .with_seed(42)
}

#[test]
fn test_store_survives_restart_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = hard_config().with_store_path(temp_dir.path().join("values.msgpack"));
    let app = App::for_testing()
        .with_repository(MsgPackRepository::new())
        .build();

    let mut session = app.open_session(&config);
    assert!(session.store().is_empty());
    session.play_turn(at(0, 0)).expect("Failed to play");
    session.play_turn(at(0, 1)).expect("Failed to play");
    let last = session.play_turn(at(1, 0)).expect("Failed to play");

    assert_eq!(last.outcome, Some(GameOutcome::Win(Player::O)));
    let line = session.winning_line().expect("Expected a winning line");
    assert_eq!(line.kind(), LineKind::AntiDiagonal);
    app.close_session(session, &config)
        .expect("Failed to close session");

    let reopened = app.open_session(&config);
    let before = Board::from_string("XXO XO. ...")
        .expect("Failed to parse board")
        .state();
    assert_eq!(reopened.store().len(), 1);
    assert_eq!(reopened.store().peek(&before, at(2, 0)), Some(0.55));
}

#[test]
fn test_medium_moves_are_not_recorded_by_default() {
    let repo = InMemoryRepository::new();
    let app = App::for_testing().with_repository(repo).build();

    for record in [false, true] {
        let config = SessionConfig::new(Difficulty::Medium)
            .with_attribution(WinAttribution::PerBranch)
            .with_record_bounded_search(record)
            .with_seed(5)
            .with_store_path(format!("medium-{record}"));
        let mut session = app.open_session(&config);
        let mut opponent = RandomOpponent::with_seed("random".to_string(), 8);
        let mut pipeline = EvaluationPipeline::new(EvaluationConfig::new(20));
        let result = pipeline
            .run(&mut session, &mut opponent)
            .expect("Failed to run evaluation");

        if record {
            assert!(result.engine_wins + result.draws > 0);
            assert!(!session.store().is_empty());
        } else {
            assert!(session.store().is_empty());
        }
    }
}

#[test]
fn test_easy_moves_are_never_recorded() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .with_default_seed(3)
        .build();
    let config = SessionConfig::new(Difficulty::Easy).with_record_bounded_search(true);
    let mut session = app.open_session(&config);
    let mut opponent = DefensiveOpponent::with_seed("defensive".to_string(), 2);

    EvaluationPipeline::new(EvaluationConfig::new(10))
        .run(&mut session, &mut opponent)
        .expect("Failed to run evaluation");
    assert!(session.store().is_empty());
    assert_eq!(session.stats().games(), 10);
}

#[test]
fn test_hard_per_branch_never_loses_to_random_play() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();
    let mut session = app.open_session(&hard_config());
    let mut opponent = RandomOpponent::with_seed("random".to_string(), 17);

    let result = EvaluationPipeline::new(EvaluationConfig::new(25))
        .run(&mut session, &mut opponent)
        .expect("Failed to run evaluation");
    assert_eq!(result.engine_losses, 0);
    assert!(!session.store().is_empty());
}

#[test]
fn test_moves_after_game_over_are_rejected() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();
    let mut session = app.open_session(&hard_config());
    session.play_turn(at(0, 0)).expect("Failed to play");
    session.play_turn(at(0, 1)).expect("Failed to play");
    session.play_turn(at(1, 0)).expect("Failed to play");

    assert!(matches!(session.play_turn(at(2, 2)), Err(Error::GameOver)));
    assert!(matches!(
        session.request_engine_move(),
        Err(Error::GameOver)
    ));
}
