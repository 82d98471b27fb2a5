//! Engine events and the collaborator contracts that consume them.
//!
//! Transitions append [`EngineEvent`]s to a queue owned by the engine. The
//! host drains the queue once per frame (after the tick) and forwards it to a
//! [`RenderSurface`] and a [`GameListener`]. Collaborators never write back
//! into the simulation.

use crate::types::{CellState, Coord};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunEnd {
    /// Head left the board
    Wall,
    /// Head hit the body
    Body,
    /// Snake fills the board; no cell left for fruit
    BoardFull,
    /// Abandoned with `stop()`
    Abandoned,
}

impl RunEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunEnd::Wall => "wall",
            RunEnd::Body => "body",
            RunEnd::BoardFull => "board_full",
            RunEnd::Abandoned => "abandoned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    CellChanged { coord: Coord, state: CellState },
    ResetAll,
    FadeAll(f32),
    UnfadeAll,
    FruitEaten,
    ScoreChanged(u32),
    Paused,
    Resumed,
    RunEnded { reason: RunEnd, score: u32, tier: u32 },
}

/// Screen surface that mirrors the board.
pub trait RenderSurface {
    fn update_cell(&mut self, coord: Coord, state: CellState);
    fn reset_all(&mut self);
    fn fade_all(&mut self, alpha: f32);
    fn unfade_all(&mut self);
}

/// Audio and score display hooks. All methods default to no-ops.
pub trait GameListener {
    fn on_fruit_eaten(&mut self) {}
    fn on_game_over(&mut self, _reason: RunEnd, _score: u32) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_pause_changed(&mut self, _paused: bool) {}
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl GameListener for NullListener {}

/// Forward a batch of events to the collaborators, in order.
pub fn dispatch<S, L>(events: impl IntoIterator<Item = EngineEvent>, surface: &mut S, listener: &mut L)
where
    S: RenderSurface + ?Sized,
    L: GameListener + ?Sized,
{
    for event in events {
        match event {
            EngineEvent::CellChanged { coord, state } => surface.update_cell(coord, state),
            EngineEvent::ResetAll => surface.reset_all(),
            EngineEvent::FadeAll(alpha) => surface.fade_all(alpha),
            EngineEvent::UnfadeAll => surface.unfade_all(),
            EngineEvent::FruitEaten => listener.on_fruit_eaten(),
            EngineEvent::ScoreChanged(score) => listener.on_score_changed(score),
            EngineEvent::Paused => listener.on_pause_changed(true),
            EngineEvent::Resumed => listener.on_pause_changed(false),
            EngineEvent::RunEnded { reason, score, .. } => listener.on_game_over(reason, score),
        }
    }
}
