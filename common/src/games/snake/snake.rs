use std::collections::{HashSet, VecDeque};

use super::types::{Cell, Coords, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub coords: Coords,
    pub cell: Cell,
}

impl Segment {
    pub fn new(coords: Coords, cell: Cell) -> Self {
        Self { coords, cell }
    }
}

/// The snake's body, head first.
///
/// `occupied` mirrors the cells of `segments` and is updated by every mutation, so
/// membership checks stay O(1). The chain never becomes empty and never holds the same
/// cell twice: both growth operations refuse a cell that is already occupied.
#[derive(Clone, Debug)]
pub struct SnakeBody {
    segments: VecDeque<Segment>,
    occupied: HashSet<Cell>,
}

impl SnakeBody {
    pub fn new(start: Segment) -> Self {
        Self {
            segments: VecDeque::from([start]),
            occupied: HashSet::from([start.cell]),
        }
    }

    pub fn head(&self) -> Segment {
        self.segments[0]
    }

    pub fn tail(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A body always has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// Segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Makes `(coords, cell)` the new head. Returns false and changes nothing if the
    /// cell is already part of the body.
    pub fn advance_head(&mut self, coords: Coords, cell: Cell) -> bool {
        if !self.occupied.insert(cell) {
            return false;
        }
        self.segments.push_front(Segment::new(coords, cell));
        true
    }

    /// Drops the tail segment. A single-segment body is left untouched.
    pub fn retreat_tail(&mut self) -> Option<Segment> {
        if self.segments.len() <= 1 {
            return None;
        }
        let tail = self.segments.pop_back()?;
        self.occupied.remove(&tail.cell);
        Some(tail)
    }

    /// Adds a segment behind the current tail, keeping the old tail. Returns false and
    /// changes nothing if the cell is already part of the body.
    pub fn extend_tail(&mut self, coords: Coords, cell: Cell) -> bool {
        if !self.occupied.insert(cell) {
            return false;
        }
        self.segments.push_back(Segment::new(coords, cell));
        true
    }

    /// Swaps head and tail roles by reversing the chain in place.
    pub fn reverse(&mut self) {
        self.segments.make_contiguous().reverse();
    }

    /// Direction the tail travels in: from the tail towards the segment in front of it.
    /// None for a single segment.
    pub fn tail_direction(&self) -> Option<Direction> {
        let len = self.segments.len();
        if len < 2 {
            return None;
        }
        let tail = self.segments[len - 1];
        let ahead = self.segments[len - 2];
        Direction::between(tail.coords, ahead.coords)
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let walked: HashSet<Cell> = self.segments.iter().map(|s| s.cell).collect();
        walked.len() == self.segments.len() && walked == self.occupied
    }
}
