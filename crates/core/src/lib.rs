//! Core game logic - pure, deterministic, and testable
//!
//! This crate owns the authoritative snake board and everything that mutates
//! it. It has no dependency on a terminal, audio device or file system:
//!
//! - **Deterministic**: same seed and same inputs produce the same run
//! - **Testable**: time is an explicit argument, never read from a clock
//! - **Portable**: rendering and audio are reached only through the
//!   [`events::RenderSurface`] and [`events::GameListener`] traits
//!
//! # Module Structure
//!
//! - [`grid`]: 30x30 board of cell states with bounds checks
//! - [`snake`]: ordered body segments, head first
//! - [`spawner`]: seeded uniform fruit placement over free cells
//! - [`input_buffer`]: per-frame direction sample → committed direction
//! - [`engine`]: Stopped/Running/Paused lifecycle and the tick transition
//! - [`events`]: engine events and collaborator contracts
//! - [`ledger`]: best/average score per speed tier
//! - [`settings`]: persisted user settings
//! - [`store`]: key-value persistence contract
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use grid_snake_core::{RunState, ScoreLedger, SimulationEngine};
//! use grid_snake_types::Direction;
//!
//! let mut ledger = ScoreLedger::new();
//! let mut engine = SimulationEngine::new(12345);
//! engine.start(10.0, Duration::ZERO);
//!
//! // The first tick is due one interval (100ms) after start.
//! let outcome = engine
//!     .frame(Duration::from_millis(150), Direction::Right, &mut ledger)
//!     .unwrap();
//! assert!(outcome.is_some());
//! assert_eq!(engine.state(), RunState::Running);
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod input_buffer;
pub mod ledger;
pub mod rng;
pub mod settings;
pub mod snake;
pub mod snapshot;
pub mod spawner;
pub mod store;

pub use grid_snake_types as types;

// Re-export commonly used types for convenience
pub use engine::{RunState, SimulationEngine, TickOutcome};
pub use error::{EngineError, GridError, SpawnError, StoreError};
pub use events::{EngineEvent, GameListener, NullListener, RenderSurface, RunEnd};
pub use grid::Grid;
pub use input_buffer::InputBuffer;
pub use ledger::{ScoreEntry, ScoreLedger, SCORES_KEY};
pub use rng::SimpleRng;
pub use settings::{Settings, SETTINGS_KEY};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
pub use spawner::FruitSpawner;
pub use store::{KeyValueStore, MemoryStore};
