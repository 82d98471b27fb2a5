//! Per-frame input reduction.
//!
//! The host samples one [`Direction`] per frame. The buffer turns that sample,
//! plus the last accepted turn, into the direction the next tick will use.
//! A sample is accepted only if it would not walk the head straight back into
//! the neck; otherwise the previous committed direction stands.

use crate::snake::Snake;
use crate::types::{Direction, START_DIRECTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBuffer {
    committed: Direction,
}

impl InputBuffer {
    pub fn new(initial: Direction) -> Self {
        Self { committed: initial }
    }

    /// Direction the next tick will move in
    pub fn committed(&self) -> Direction {
        self.committed
    }

    pub fn reset(&mut self, direction: Direction) {
        self.committed = direction;
    }

    /// Whether `candidate` may become the committed direction.
    ///
    /// Any non-`None` direction is legal for a one-segment snake. Longer snakes
    /// reject the direction whose next cell is the neck.
    pub fn is_legal(candidate: Direction, snake: &Snake) -> bool {
        if candidate.is_none() {
            return false;
        }

        match (snake.head(), snake.neck()) {
            (Some(head), Some(neck)) => head.step(candidate) != neck,
            _ => true,
        }
    }

    /// Fold this frame's sample into the buffer and return the resolved direction.
    ///
    /// Identical repeated samples are idempotent.
    pub fn sample(&mut self, swipe: Direction, snake: &Snake) -> Direction {
        if Self::is_legal(swipe, snake) {
            self.committed = swipe;
        }
        self.committed
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(START_DIRECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn snake_moving_right() -> Snake {
        Snake::from_segments([Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5)])
    }

    #[test]
    fn test_reversal_into_neck_is_rejected() {
        let snake = snake_moving_right();
        let mut input = InputBuffer::new(Direction::Right);

        assert_eq!(input.sample(Direction::Left, &snake), Direction::Right);
        assert_eq!(input.committed(), Direction::Right);
    }

    #[test]
    fn test_perpendicular_turn_is_accepted() {
        let snake = snake_moving_right();
        let mut input = InputBuffer::new(Direction::Right);

        assert_eq!(input.sample(Direction::Up, &snake), Direction::Up);
        assert_eq!(input.committed(), Direction::Up);
    }

    #[test]
    fn test_none_falls_back_and_keeps_last_turn() {
        let snake = snake_moving_right();
        let mut input = InputBuffer::new(Direction::Right);

        input.sample(Direction::Down, &snake);
        assert_eq!(input.sample(Direction::None, &snake), Direction::Down);
        assert_eq!(input.sample(Direction::None, &snake), Direction::Down);
    }

    #[test]
    fn test_single_segment_accepts_any_direction() {
        let snake = Snake::new(Coord::new(15, 15));
        let mut input = InputBuffer::new(Direction::Right);

        assert_eq!(input.sample(Direction::Left, &snake), Direction::Left);
        assert!(!InputBuffer::is_legal(Direction::None, &snake));
    }

    #[test]
    fn test_only_exact_neck_cell_is_rejected() {
        // Left lands on (4, 6); only the exact neck cell is a reversal.
        let snake = Snake::from_segments([Coord::new(5, 6), Coord::new(5, 5), Coord::new(4, 5)]);
        assert!(InputBuffer::is_legal(Direction::Left, &snake));
        assert!(!InputBuffer::is_legal(Direction::Down, &snake));
    }
}
