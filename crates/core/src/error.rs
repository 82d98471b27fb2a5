//! Error types for the simulation core.
//!
//! Collisions are not errors: they are ordinary transitions reported through
//! [`crate::engine::TickOutcome`]. Everything here is either a caller bug
//! (out-of-range access, ticking a stopped engine) or an I/O failure of the
//! persistence store.

use thiserror::Error;

use crate::types::Coord;

/// Grid access outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfRange { x: i16, y: i16 },
}

impl GridError {
    pub fn out_of_range(coord: Coord) -> Self {
        GridError::OutOfRange {
            x: coord.x,
            y: coord.y,
        }
    }
}

/// Fruit placement failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free cell left for fruit")]
    NoFreeCell,
}

/// Invariant violations surfaced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("tick requested while no run is active")]
    NotRunning,
    #[error("snake has no segments")]
    EmptySnake,
    #[error("invalid position: {0}")]
    InvalidPosition(&'static str),
}

/// Persistence store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store codec error: {0}")]
    Codec(#[from] serde_json::Error),
    /// Well-formed JSON whose numbers cannot describe real runs
    #[error("store data rejected: {0}")]
    Inconsistent(&'static str),
}
