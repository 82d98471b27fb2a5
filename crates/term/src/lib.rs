//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed
//! to a crossterm backend.
//!
//! Pipeline:
//! - [`BoardCanvas`] mirrors the board by consuming engine events
//! - [`Theme`] turns cell states and segment order into colours
//! - [`GameView`] lays board and status panel out into a [`FrameBuffer`]
//! - [`TerminalRenderer`] writes only the spans that changed since the last frame

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use grid_snake_core as core;
pub use grid_snake_types as types;

pub use canvas::BoardCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, StatusView, Viewport};
pub use renderer::{changed_spans, ScreenState, Span, TerminalRenderer};
pub use theme::Theme;
