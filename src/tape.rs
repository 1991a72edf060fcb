//! This module provides the `Tape`, a lazily materialized tape that grows in both directions.

use std::collections::VecDeque;
use std::fmt;

/// A single Turing Machine tape.
///
/// Only cells that were given initially or written since exist in memory. Reading any
/// other position yields the blank symbol and leaves the tape untouched; writing one past
/// either end materializes a new cell. Positions are relative to the leftmost
/// materialized cell, so growing to the left shifts every position by one. `origin`
/// records how many cells were added on the left, which maps positions back to the
/// coordinates of the initial tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape<S> {
    cells: VecDeque<S>,
    blank: S,
    origin: usize,
}

impl<S: Clone> Tape<S> {
    /// Creates a tape holding `cells` left to right.
    pub fn new(cells: impl IntoIterator<Item = S>, blank: S) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            blank,
            origin: 0,
        }
    }

    /// Returns the symbol at `position`, or the blank symbol if the cell is not materialized.
    pub fn read(&self, position: isize) -> &S {
        usize::try_from(position)
            .ok()
            .and_then(|index| self.cells.get(index))
            .unwrap_or(&self.blank)
    }

    /// Writes `symbol` at `position` and returns the position of the written cell.
    ///
    /// The returned position differs from `position` only when the tape grew to the left,
    /// in which case the new cell becomes position 0. Writing further than one cell past
    /// an end fills the gap with blanks.
    pub fn write(&mut self, position: isize, symbol: S) -> isize {
        if position < 0 {
            for _ in 1..position.unsigned_abs() {
                self.cells.push_front(self.blank.clone());
            }
            self.cells.push_front(symbol);
            self.origin += position.unsigned_abs();
            return 0;
        }

        let index = position.unsigned_abs();
        if index < self.cells.len() {
            self.cells[index] = symbol;
        } else {
            while self.cells.len() < index {
                self.cells.push_back(self.blank.clone());
            }
            self.cells.push_back(symbol);
        }

        position
    }

    /// Returns the tape content left to right.
    pub fn to_vec(&self) -> Vec<S> {
        self.cells.iter().cloned().collect()
    }
}

impl<S> Tape<S> {
    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank(&self) -> &S {
        &self.blank
    }

    /// Position of the initial tape's first cell.
    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, S> {
        self.cells.iter()
    }
}

impl<S: fmt::Display> fmt::Display for Tape<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|symbol| write!(f, "{symbol}"))
    }
}
