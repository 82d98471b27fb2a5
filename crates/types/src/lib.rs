//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond small pure helpers, making
//! them usable in any context (simulation core, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! The board is a fixed square:
//!
//! - **Columns**: 30 (x indexed 0-29, left to right)
//! - **Rows**: 30 (y indexed 0-29, bottom to top; `Up` increments y)
//! - **Start cell**: (15, 15)
//!
//! # Tick Rate
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICKS_PER_SECOND` | 10.0 | Tick rate for a fresh install |
//! | `MIN_TICKS_PER_SECOND` | 1.0 | Slowest selectable speed |
//! | `MAX_TICKS_PER_SECOND` | 30.0 | Fastest selectable speed |
//! | `TICK_RATE_STEP` | 1.0 | Increment used by the speed stepper |
//!
//! Scores are bucketed by [`speed_tier`], the integer part of the tick rate.
//!
//! # Examples
//!
//! ```
//! use grid_snake_types::{Coord, Direction, COLS, ROWS, START};
//!
//! assert_eq!(COLS, 30);
//! assert_eq!(ROWS, 30);
//! assert_eq!(START, Coord::new(15, 15));
//!
//! // Up increments y
//! assert_eq!(START.step(Direction::Up), Coord::new(15, 16));
//!
//! // Parse a direction (case-insensitive)
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (30 columns)
pub const COLS: i16 = 30;

/// Board height in cells (30 rows)
pub const ROWS: i16 = 30;

/// Total number of cells on the board
pub const CELL_COUNT: usize = (COLS as usize) * (ROWS as usize);

/// Cell the snake occupies when a run starts
pub const START: Coord = Coord::new(COLS / 2, ROWS / 2);

/// Committed direction at the beginning of every run.
pub const START_DIRECTION: Direction = Direction::Up;

/// Default tick rate (ticks per second).
pub const DEFAULT_TICKS_PER_SECOND: f32 = 10.0;

/// Slowest selectable tick rate.
pub const MIN_TICKS_PER_SECOND: f32 = 1.0;

/// Fastest selectable tick rate.
pub const MAX_TICKS_PER_SECOND: f32 = 30.0;

/// Stepper increment for the tick rate.
pub const TICK_RATE_STEP: f32 = 1.0;

/// Alpha applied to the whole board while no run is active.
pub const FADED_ALPHA: f32 = 0.25;

/// Alpha of the last snake segment; segments fade linearly from 1.0 at the head.
pub const TAIL_ALPHA: f32 = 0.15;

/// Clamp a tick rate into the selectable range.
///
/// Non-finite input falls back to [`DEFAULT_TICKS_PER_SECOND`].
pub fn clamp_tick_rate(ticks_per_second: f32) -> f32 {
    if !ticks_per_second.is_finite() {
        return DEFAULT_TICKS_PER_SECOND;
    }
    ticks_per_second.clamp(MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND)
}

/// Score bucket for a tick rate (integer part, truncated).
///
/// ```
/// use grid_snake_types::speed_tier;
///
/// assert_eq!(speed_tier(10.0), 10);
/// assert_eq!(speed_tier(12.9), 12);
/// ```
pub fn speed_tier(ticks_per_second: f32) -> u32 {
    ticks_per_second.max(0.0) as u32
}


/// A board coordinate.
///
/// Signed so that a step off the board (e.g. x = -1) is representable and can
/// be rejected by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

impl Coord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies on the board
    pub const fn in_bounds(self) -> bool {
        !(self.x < 0 || self.x >= COLS || self.y < 0 || self.y >= ROWS)
    }

    /// Flat row-major index (y * COLS + x), or `None` when off the board
    #[inline(always)]
    pub const fn index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some((self.y as usize) * (COLS as usize) + (self.x as usize))
    }

    /// Inverse of [`Coord::index`]
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % COLS as usize) as i16,
            y: (index / COLS as usize) as i16,
        }
    }

    /// The neighbouring coordinate in `dir` (unchanged for `Direction::None`)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Movement direction sampled from input.
///
/// `None` means "no input this frame"; it is never a movement direction once
/// the snake has a second segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

/// (dx, dy) per direction, indexed by `Direction as usize`.
const DIRECTION_DELTAS: [(i16, i16); 5] = [
    (0, 1),  // Up
    (0, -1), // Down
    (-1, 0), // Left
    (1, 0),  // Right
    (0, 0),  // None
];

impl Direction {
    /// All movement directions (excludes `None`)
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[inline(always)]
    pub fn delta(self) -> (i16, i16) {
        DIRECTION_DELTAS[self as usize]
    }

    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "none" => Some(Direction::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::None => "none",
        }
    }
}

/// Non-steering commands the host applies to the engine and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Start a run (no-op while one is active)
    Start,
    /// Running ⇄ Paused
    TogglePause,
    /// Abandon the active run
    Stop,
    /// Raise the configured tick rate by one step
    Faster,
    /// Lower the configured tick rate by one step
    Slower,
    /// Flip the fruit beep setting
    ToggleBeep,
}

impl ControlAction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(ControlAction::Start),
            "pause" | "togglepause" => Some(ControlAction::TogglePause),
            "stop" => Some(ControlAction::Stop),
            "faster" => Some(ControlAction::Faster),
            "slower" => Some(ControlAction::Slower),
            "beep" | "togglebeep" => Some(ControlAction::ToggleBeep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::TogglePause => "togglePause",
            ControlAction::Stop => "stop",
            ControlAction::Faster => "faster",
            ControlAction::Slower => "slower",
            ControlAction::ToggleBeep => "toggleBeep",
        }
    }
}

/// State of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Snake,
    Fruit,
}

impl CellState {
    /// Stable byte encoding used by snapshots (0 empty, 1 snake, 2 fruit)
    pub fn as_u8(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Snake => 1,
            CellState::Fruit => 2,
        }
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `base` by `alpha` (1.0 keeps `self`, 0.0 yields `base`)
    pub fn blend_over(self, base: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Rgb::new(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }
}

/// A colour in HSV space, every component in `[0, 1]`.
///
/// Persisted as `{ "h": .., "s": .., "v": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

/// Convert HSV (each in `[0, 1]`) to RGB.
///
/// ```
/// use grid_snake_types::{hsv_to_rgb, Rgb};
///
/// assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
/// assert_eq!(hsv_to_rgb(120.0 / 360.0, 1.0, 1.0), Rgb::new(0, 255, 0));
/// assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), Rgb::new(0, 0, 0));
/// ```
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h.clamp(0.0, 1.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let scaled = (h * 6.0) % 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let to_u8 = |c: f32| (c * 255.0).round() as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

/// Which themed colour is being read or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HueField {
    Primary,
    Secondary,
    Fruit,
    Grid,
    Background,
}

impl HueField {
    pub const ALL: [HueField; 5] = [
        HueField::Primary,
        HueField::Secondary,
        HueField::Fruit,
        HueField::Grid,
        HueField::Background,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HueField::Primary => "primary",
            HueField::Secondary => "secondary",
            HueField::Fruit => "fruit",
            HueField::Grid => "grid",
            HueField::Background => "background",
        }
    }
}

#[cfg(test)]
mod coord_tests {
    use super::*;

    #[test]
    fn direction_deltas_follow_board_axes() {
        let c = Coord::new(5, 5);
        assert_eq!(c.step(Direction::Up), Coord::new(5, 6));
        assert_eq!(c.step(Direction::Down), Coord::new(5, 4));
        assert_eq!(c.step(Direction::Left), Coord::new(4, 5));
        assert_eq!(c.step(Direction::Right), Coord::new(6, 5));
        assert_eq!(c.step(Direction::None), c);
    }

    #[test]
    fn index_roundtrip_and_bounds() {
        assert_eq!(Coord::new(0, 0).index(), Some(0));
        assert_eq!(Coord::new(29, 0).index(), Some(29));
        assert_eq!(Coord::new(0, 1).index(), Some(30));
        assert_eq!(Coord::new(29, 29).index(), Some(899));
        assert_eq!(Coord::new(-1, 0).index(), None);
        assert_eq!(Coord::new(0, 30).index(), None);
        assert_eq!(Coord::from_index(31), Coord::new(1, 1));
    }

    #[test]
    fn hsv_primary_colours() {
        assert_eq!(Hsv::new(60.0 / 360.0, 1.0, 1.0).to_rgb(), Rgb::new(255, 255, 0));
        assert_eq!(Hsv::new(0.0, 0.0, 0.6).to_rgb(), Rgb::new(153, 153, 153));
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn blend_over_endpoints() {
        let fg = Rgb::new(200, 100, 0);
        let bg = Rgb::new(0, 0, 0);
        assert_eq!(fg.blend_over(bg, 1.0), fg);
        assert_eq!(fg.blend_over(bg, 0.0), bg);
        assert_eq!(fg.blend_over(bg, 0.5), Rgb::new(100, 50, 0));
    }
}
