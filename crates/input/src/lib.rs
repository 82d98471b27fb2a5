//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into steering samples
//! ([`crate::types::Direction`]) and [`crate::types::ControlAction`]s, and
//! reduces everything pressed during one host frame into a single
//! [`FrameInput`].

pub mod map;
pub mod sampler;

pub use grid_snake_types as types;

pub use map::{handle_key_event, should_quit, KeyCommand};
pub use sampler::{FrameInput, SwipeSampler, MAX_CONTROLS_PER_FRAME};
