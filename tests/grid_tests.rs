//! Board, snake, input buffer and spawner through the public API

use grid_snake::core::{FruitSpawner, Grid, GridError, InputBuffer, SimpleRng, Snake, SpawnError};
use grid_snake::types::{CellState, Coord, Direction, CELL_COUNT, COLS, ROWS};

#[test]
fn test_grid_bounds() {
    let grid = Grid::new();

    assert!(grid.is_in_bounds(Coord::new(0, 0)));
    assert!(grid.is_in_bounds(Coord::new(COLS - 1, ROWS - 1)));
    assert!(!grid.is_in_bounds(Coord::new(-1, 0)));
    assert!(!grid.is_in_bounds(Coord::new(0, -1)));
    assert!(!grid.is_in_bounds(Coord::new(COLS, 0)));
    assert!(!grid.is_in_bounds(Coord::new(0, ROWS)));
}

#[test]
fn test_grid_out_of_range_is_an_error() {
    let mut grid = Grid::new();

    assert_eq!(
        grid.cell_at(Coord::new(30, 2)),
        Err(GridError::OutOfRange { x: 30, y: 2 })
    );
    assert!(grid.set_cell(Coord::new(-1, -1), CellState::Fruit).is_err());
    assert_eq!(grid.count(CellState::Empty), CELL_COUNT);
}

#[test]
fn test_grid_set_and_read() {
    let mut grid = Grid::new();
    grid.set_cell(Coord::new(3, 7), CellState::Snake).unwrap();
    grid.set_cell(Coord::new(29, 29), CellState::Fruit).unwrap();

    assert_eq!(grid.cell_at(Coord::new(3, 7)), Ok(CellState::Snake));
    assert_eq!(grid.cell_at(Coord::new(29, 29)), Ok(CellState::Fruit));
    assert_eq!(grid.count(CellState::Snake), 1);

    grid.clear();
    assert_eq!(grid.count(CellState::Empty), CELL_COUNT);
}

#[test]
fn test_snake_advance_and_grow() {
    let mut snake = Snake::new(Coord::new(5, 5));

    let vacated = snake.advance(Coord::new(6, 5), false);
    assert_eq!(vacated, Some(Coord::new(5, 5)));
    assert_eq!(snake.len(), 1);

    let vacated = snake.advance(Coord::new(7, 5), true);
    assert_eq!(vacated, None);
    assert_eq!(snake.len(), 2);
    assert_eq!(snake.head(), Some(Coord::new(7, 5)));
    assert_eq!(snake.tail(), Some(Coord::new(6, 5)));
    assert!(snake.contains(Coord::new(6, 5)));
    assert!(!snake.contains(Coord::new(5, 5)));
}

#[test]
fn test_reversal_into_neck_always_rejected() {
    // Every orientation of a two-segment snake in the middle of the board.
    for dir in Direction::MOVES {
        let head = Coord::new(10, 10);
        let neck = head.step(dir.opposite());
        let snake = Snake::from_segments([head, neck]);
        let mut input = InputBuffer::new(dir);

        assert!(!InputBuffer::is_legal(dir.opposite(), &snake));
        assert_eq!(input.sample(dir.opposite(), &snake), dir);
        assert_eq!(input.committed(), dir);
    }
}

#[test]
fn test_single_segment_accepts_any_direction() {
    let snake = Snake::new(Coord::new(10, 10));
    let mut input = InputBuffer::new(Direction::Up);

    assert_eq!(input.sample(Direction::Down, &snake), Direction::Down);
    assert_eq!(input.sample(Direction::None, &snake), Direction::Down);
}

#[test]
fn test_spawner_matches_free_cell_enumeration() {
    let seed = 4242;
    let mut grid = Grid::new();
    let snake = Snake::from_segments([Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
    for c in snake.iter() {
        grid.set_cell(c, CellState::Snake).unwrap();
    }

    let mut spawner = FruitSpawner::new(seed);
    let mut shadow = SimpleRng::new(seed);
    let free: Vec<Coord> = grid
        .iter()
        .filter(|&(c, _)| !snake.contains(c))
        .map(|(c, _)| c)
        .collect();
    assert_eq!(free.len(), CELL_COUNT - 3);

    for _ in 0..50 {
        let cell = spawner.spawn(&grid, &snake).unwrap();
        let expected = free[(shadow.next_u32() % free.len() as u32) as usize];
        assert_eq!(cell, expected);
        assert!(!snake.contains(cell));
    }
}

#[test]
fn test_spawner_full_board() {
    let mut grid = Grid::new();
    let snake = Snake::from_segments((0..CELL_COUNT).map(Coord::from_index));
    for c in snake.iter() {
        grid.set_cell(c, CellState::Snake).unwrap();
    }

    let mut spawner = FruitSpawner::new(1);
    assert_eq!(spawner.spawn(&grid, &snake), Err(SpawnError::NoFreeCell));
}
