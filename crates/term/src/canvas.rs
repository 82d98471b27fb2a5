//! Screen-side mirror of the board.
//!
//! `BoardCanvas` is the terminal host's [`RenderSurface`]: it only ever learns
//! about the board through engine events, never by reading the grid.

use crate::core::RenderSurface;
use crate::types::{CellState, Coord, CELL_COUNT};

#[derive(Debug, Clone)]
pub struct BoardCanvas {
    cells: [CellState; CELL_COUNT],
    alpha: f32,
}

impl BoardCanvas {
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; CELL_COUNT],
            alpha: 1.0,
        }
    }

    /// Last state published for `coord` (`Empty` when off the board)
    pub fn cell(&self, coord: Coord) -> CellState {
        coord
            .index()
            .map(|i| self.cells[i])
            .unwrap_or(CellState::Empty)
    }

    /// Board-wide opacity (1.0 unless faded)
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_faded(&self) -> bool {
        self.alpha < 1.0
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }
}

impl Default for BoardCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for BoardCanvas {
    fn update_cell(&mut self, coord: Coord, state: CellState) {
        if let Some(i) = coord.index() {
            self.cells[i] = state;
        }
    }

    fn reset_all(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    fn fade_all(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn unfade_all(&mut self) {
        self.alpha = 1.0;
    }
}
