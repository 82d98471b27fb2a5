use crate::engine::RunState;
use crate::types::{Coord, Direction, COLS, ROWS};

/// Read-only copy of everything a renderer or observer needs after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// `[row][col]`, see `CellState::as_u8`
    pub board: [[u8; COLS as usize]; ROWS as usize],
    /// Head first
    pub snake: Vec<Coord>,
    pub fruit: Option<Coord>,
    pub state: RunState,
    pub direction: Direction,
    pub score: u32,
    pub ticks_per_second: f32,
    pub tier: u32,
    pub run_id: u32,
    pub tick: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; COLS as usize]; ROWS as usize];
        self.snake.clear();
        self.fruit = None;
        self.state = RunState::Stopped;
        self.direction = Direction::None;
        self.score = 0;
        self.ticks_per_second = 0.0;
        self.tier = 0;
        self.run_id = 0;
        self.tick = 0;
    }

    pub fn playable(&self) -> bool {
        self.state == RunState::Running
    }

    /// Segment position (0 = head) of `coord`, if the snake occupies it
    pub fn segment_index(&self, coord: Coord) -> Option<usize> {
        self.snake.iter().position(|&c| c == coord)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLS as usize]; ROWS as usize],
            snake: Vec::new(),
            fruit: None,
            state: RunState::Stopped,
            direction: Direction::None,
            score: 0,
            ticks_per_second: 0.0,
            tier: 0,
            run_id: 0,
            tick: 0,
        }
    }
}
