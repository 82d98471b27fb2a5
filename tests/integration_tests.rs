//! Integration tests for the host app: controls, frames and checkpoints

use std::time::Duration;

use grid_snake::core::{
    MemoryStore, NullListener, RunEnd, RunState, ScoreLedger, Settings, TickOutcome,
    SCORES_KEY, SETTINGS_KEY,
};
use grid_snake::store::FileStore;
use grid_snake::term::BoardCanvas;
use grid_snake::types::{CellState, ControlAction, Direction, START};
use grid_snake::{App, FruitChime};
use tempfile::TempDir;

const FRAME: Duration = Duration::from_millis(16);

/// Run frames until the engine reports a tick or `limit` frames pass.
fn frames_until_tick(
    app: &mut App<MemoryStore>,
    now: &mut Duration,
    swipe: Direction,
    limit: usize,
) -> Option<TickOutcome> {
    for _ in 0..limit {
        *now += FRAME;
        if let Some(outcome) = app.frame(*now, swipe).unwrap() {
            return Some(outcome);
        }
    }
    None
}

#[test]
fn test_game_lifecycle() {
    let mut app = App::new(MemoryStore::new(), 12345);
    assert_eq!(app.engine().state(), RunState::Stopped);

    assert!(app.apply(ControlAction::Start, Duration::ZERO));
    assert_eq!(app.engine().state(), RunState::Running);
    assert!(!app.apply(ControlAction::Start, Duration::ZERO));

    assert!(app.apply(ControlAction::TogglePause, Duration::ZERO));
    assert_eq!(app.engine().state(), RunState::Paused);
    assert!(app.apply(ControlAction::Stop, Duration::ZERO));
    assert_eq!(app.engine().state(), RunState::Stopped);

    // Abandoned run still counts.
    assert_eq!(app.ledger().runs_for(10), 1);
    assert!(app.store().get(SCORES_KEY).is_some());
}

#[test]
fn test_frames_move_the_snake() {
    let mut app = App::new(MemoryStore::new(), 3);
    let mut now = Duration::ZERO;
    app.apply(ControlAction::Start, now);

    let outcome = frames_until_tick(&mut app, &mut now, Direction::Right, 20);
    assert!(outcome.is_some());
    assert_eq!(app.engine().snake().head(), Some(START.step(Direction::Right)));
}

#[test]
fn test_paused_app_does_not_tick() {
    let mut app = App::new(MemoryStore::new(), 3);
    let mut now = Duration::ZERO;
    app.apply(ControlAction::Start, now);
    app.apply(ControlAction::TogglePause, now);

    assert_eq!(frames_until_tick(&mut app, &mut now, Direction::Right, 100), None);
    assert_eq!(app.engine().snake().head(), Some(START));
}

#[test]
fn test_game_over_is_checkpointed() {
    let mut app = App::new(MemoryStore::new(), 8);
    let mut now = Duration::ZERO;
    app.apply(ControlAction::Start, now);

    // Straight up from the centre reaches the top wall within ROWS ticks.
    let mut ended = None;
    for _ in 0..40 {
        if let Some(TickOutcome::Ended { reason, score }) =
            frames_until_tick(&mut app, &mut now, Direction::Up, 20)
        {
            ended = Some((reason, score));
            break;
        }
    }

    let (reason, score) = ended.expect("run ends at the wall");
    assert_eq!(reason, RunEnd::Wall);
    assert_eq!(app.engine().state(), RunState::Stopped);

    let saved = ScoreLedger::from_blob(app.store().get(SCORES_KEY).unwrap()).unwrap();
    assert_eq!(saved.runs_for(10), 1);
    assert_eq!(saved.best_for(10), score);
}

#[test]
fn test_speed_controls_pick_the_bucket() {
    let mut app = App::new(MemoryStore::new(), 1);
    for _ in 0..5 {
        app.apply(ControlAction::Faster, Duration::ZERO);
    }
    assert_eq!(app.tick_rate(), 15.0);
    assert_eq!(app.status().tier, 15);

    app.apply(ControlAction::Start, Duration::ZERO);
    app.apply(ControlAction::Stop, Duration::ZERO);
    assert_eq!(app.ledger().runs_for(15), 1);

    // The stop checkpoint also wrote the changed setting.
    let saved = Settings::from_blob(app.store().get(SETTINGS_KEY).unwrap()).unwrap();
    assert_eq!(saved.ticks_per_second, 15.0);
}

#[test]
fn test_tick_rate_limits() {
    let mut app = App::new(MemoryStore::new(), 1);
    for _ in 0..100 {
        app.apply(ControlAction::Slower, Duration::ZERO);
    }
    assert_eq!(app.tick_rate(), 1.0);
    assert!(!app.apply(ControlAction::Slower, Duration::ZERO));
}

#[test]
fn test_suspend_pauses_and_saves() {
    let mut app = App::new(MemoryStore::new(), 1);
    app.apply(ControlAction::ToggleBeep, Duration::ZERO);
    app.apply(ControlAction::Start, Duration::ZERO);

    app.suspend(Duration::from_millis(50)).unwrap();

    assert_eq!(app.engine().state(), RunState::Paused);
    assert!(app.store().get(SETTINGS_KEY).is_some());
}

#[test]
fn test_published_events_reach_canvas_and_listener() {
    let mut app = App::new(MemoryStore::new(), 11);
    let mut canvas = BoardCanvas::new();
    let mut chime = FruitChime::default();

    app.publish(&mut canvas, &mut chime);
    assert!(canvas.is_faded());

    app.apply(ControlAction::Start, Duration::ZERO);
    app.publish(&mut canvas, &mut chime);
    assert!(!canvas.is_faded());
    assert_eq!(canvas.cell(START), CellState::Snake);
    assert_eq!(canvas.count(CellState::Fruit), 1);

    app.apply(ControlAction::Stop, Duration::ZERO);
    app.publish(&mut canvas, &mut chime);
    assert!(canvas.is_faded());
    assert_eq!(canvas.count(CellState::Snake), 0);
    assert_eq!(chime.last_end(), Some((RunEnd::Abandoned, 0)));
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let store = FileStore::open(dir.path()).unwrap();
        let mut app = App::new(store, 5).with_tick_rate_override(Some(20.0));
        app.apply(ControlAction::Start, Duration::ZERO);
        app.publish(&mut BoardCanvas::new(), &mut NullListener);
        // Quit mid-run.
        app.shutdown().unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let app = App::new(store, 6);

    // The override was session-only; the run it played is on record.
    assert_eq!(app.tick_rate(), 10.0);
    assert_eq!(app.ledger().runs_for(20), 1);
}
