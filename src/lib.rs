//! Grid snake (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the [`app`]
//! module, which wires the simulation core to persistence and the terminal.

pub mod app;

pub use grid_snake_core as core;
pub use grid_snake_input as input;
pub use grid_snake_store as store;
pub use grid_snake_term as term;
pub use grid_snake_types as types;

pub use app::{App, FruitChime};
