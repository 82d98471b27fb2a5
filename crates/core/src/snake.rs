//! Snake module - ordered body segments, head first
//!
//! The snake itself knows nothing about the grid. The engine keeps the two in
//! sync and checks for self-collision before calling [`Snake::advance`].

use std::collections::VecDeque;

use crate::types::{Coord, CELL_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    body: VecDeque<Coord>,
}

impl Snake {
    /// A one-segment snake at `start`
    pub fn new(start: Coord) -> Self {
        let mut body = VecDeque::with_capacity(CELL_COUNT);
        body.push_back(start);
        Self { body }
    }

    /// Build from explicit segments, head first
    pub fn from_segments(segments: impl IntoIterator<Item = Coord>) -> Self {
        Self {
            body: segments.into_iter().collect(),
        }
    }

    pub fn head(&self) -> Option<Coord> {
        self.body.front().copied()
    }

    /// Segment directly behind the head
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Option<Coord> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.body.contains(&coord)
    }

    /// Push `new_head` to the front; pop the tail unless `grow`.
    ///
    /// Returns the vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Coord, grow: bool) -> Option<Coord> {
        self.body.push_front(new_head);
        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }

    /// Truncate to a single segment at `start`
    pub fn reset(&mut self, start: Coord) {
        self.body.clear();
        self.body.push_back(start);
    }

    pub fn clear(&mut self) {
        self.body.clear();
    }

    /// Segments from head to tail
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.body.iter().copied()
    }
}
