//! Grid module - the authoritative board
//!
//! The grid is a 30x30 board where each cell is empty, part of the snake, or
//! the fruit. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..29 (left to right) and y ranges 0..29
//! (bottom to top).

use crate::error::GridError;
use crate::types::{CellState, Coord, CELL_COUNT, COLS, ROWS};

/// The game board - 30 columns x 30 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [CellState; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; CELL_COUNT],
        }
    }

    pub fn width(&self) -> i16 {
        COLS
    }

    pub fn height(&self) -> i16 {
        ROWS
    }

    /// Single source of truth for wall collisions
    #[inline(always)]
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds()
    }

    /// State of the cell at `coord`
    pub fn cell_at(&self, coord: Coord) -> Result<CellState, GridError> {
        coord
            .index()
            .map(|idx| self.cells[idx])
            .ok_or(GridError::out_of_range(coord))
    }

    /// Overwrite the cell at `coord`
    pub fn set_cell(&mut self, coord: Coord, state: CellState) -> Result<(), GridError> {
        let idx = coord.index().ok_or(GridError::out_of_range(coord))?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Count cells currently in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Iterate over every coordinate in row-major order with its state
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &state)| (Coord::from_index(idx), state))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = CellState::Empty;
        }
    }

    /// Write the grid into a `[row][col]` byte matrix (see [`CellState::as_u8`])
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS as usize]; ROWS as usize]) {
        let width = COLS as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            for (x, dst) in row.iter_mut().enumerate() {
                *dst = self.cells[start + x].as_u8();
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.count(CellState::Empty), CELL_COUNT);
        assert_eq!(grid.count(CellState::Snake), 0);
    }

    #[test]
    fn test_set_and_read_back() {
        let mut grid = Grid::new();
        grid.set_cell(Coord::new(3, 7), CellState::Fruit).unwrap();

        assert_eq!(grid.cell_at(Coord::new(3, 7)), Ok(CellState::Fruit));
        assert_eq!(grid.cells()[7 * 30 + 3], CellState::Fruit);
    }

    #[test]
    fn test_out_of_range_access_fails() {
        let mut grid = Grid::new();
        let off = Coord::new(-1, 4);

        assert_eq!(
            grid.cell_at(off),
            Err(GridError::OutOfRange { x: -1, y: 4 })
        );
        assert!(grid.set_cell(Coord::new(30, 0), CellState::Snake).is_err());
        assert!(!grid.is_in_bounds(off));
        assert!(grid.is_in_bounds(Coord::new(29, 29)));
    }

    #[test]
    fn test_u8_grid_layout() {
        let mut grid = Grid::new();
        grid.set_cell(Coord::new(1, 2), CellState::Snake).unwrap();
        grid.set_cell(Coord::new(4, 0), CellState::Fruit).unwrap();

        let mut out = [[0u8; COLS as usize]; ROWS as usize];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[2][1], 1);
        assert_eq!(out[0][4], 2);
        assert_eq!(out[0][0], 0);
    }
}
