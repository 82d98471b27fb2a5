//! Fruit placement.
//!
//! Candidates are every grid coordinate in row-major order minus the cells the
//! snake occupies. One draw from the seeded RNG, reduced modulo the number of
//! candidates, picks the fruit cell, so a given seed and snake always yield
//! the same coordinate.

use crate::error::SpawnError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snake::Snake;
use crate::types::{Coord, CELL_COUNT};

#[derive(Debug, Clone)]
pub struct FruitSpawner {
    rng: SimpleRng,
}

impl FruitSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick a uniformly random cell not occupied by `snake`.
    ///
    /// Does not touch the grid; placing the fruit is up to the caller.
    pub fn spawn(&mut self, grid: &Grid, snake: &Snake) -> Result<Coord, SpawnError> {
        let mut occupied = [false; CELL_COUNT];
        for idx in snake.iter().filter_map(Coord::index) {
            occupied[idx] = true;
        }

        let free = occupied.iter().filter(|&&o| !o).count();
        if free == 0 {
            return Err(SpawnError::NoFreeCell);
        }

        let pick = self.rng.next_range(free as u32) as usize;
        grid.iter()
            .map(|(coord, _)| coord)
            .filter(|coord| coord.index().is_some_and(|idx| !occupied[idx]))
            .nth(pick)
            .ok_or(SpawnError::NoFreeCell)
    }

    /// RNG state, for replaying the placement sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for FruitSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}
