/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! The room: an M x N toroidal grid of clean and dirty cells.

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::config::{validate_dimensions, validate_room};
use crate::error::SimulationError;
use crate::Rng;

/// A cell coordinate in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row, `0 <= row < rows`.
    pub row: usize,

    /// Column, `0 <= col < cols`.
    pub col: usize,
}

impl Position {
    /// Create a position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareState {
    /// Nothing to do here.
    Clean,

    /// Waiting for an agent.
    Dirty,
}

/// Row and column offsets of the Moore neighborhood, clockwise from north-west.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// The room. Dimensions are fixed at construction and every coordinate holds exactly one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<SquareState>,
    rows: usize,
    cols: usize,
    dirty: usize,
}

// print out cells, `#` for dirty and `.` for clean, with row and column numbers mod 10.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_with(|_| None))
    }
}

impl Grid {
    /// Create a room where each cell is independently dirty with probability `dirty_fraction`.
    pub fn new(
        rows: usize,
        cols: usize,
        dirty_fraction: f64,
        rng: &mut Rng,
    ) -> Result<Self, SimulationError> {
        let len = validate_room(rows, cols, dirty_fraction)?;
        let cells: Vec<SquareState> = (0..len)
            .map(|_| {
                if rng.gen_bool(dirty_fraction) {
                    SquareState::Dirty
                } else {
                    SquareState::Clean
                }
            })
            .collect();
        let dirty = cells.iter().filter(|&&s| s == SquareState::Dirty).count();
        Ok(Self {
            cells,
            rows,
            cols,
            dirty,
        })
    }

    /// Create a room from explicit rows of cells. All rows must have the same, non-zero length.
    pub fn from_states(states: Vec<Vec<SquareState>>) -> Result<Self, SimulationError> {
        let rows = states.len();
        let cols = states.first().map_or(0, Vec::len);
        validate_dimensions(rows, cols)?;
        if states.iter().any(|row| row.len() != cols) {
            return Err(SimulationError::InvalidConfiguration(
                "all rows must have the same length".to_string(),
            ));
        }
        let cells: Vec<SquareState> = states.into_iter().flatten().collect();
        let dirty = cells.iter().filter(|&&s| s == SquareState::Dirty).count();
        Ok(Self {
            cells,
            rows,
            cols,
            dirty,
        })
    }

    /// Number of rows (M).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (N).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a room has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, SimulationError> {
        if row >= self.rows || col >= self.cols {
            return Err(SimulationError::OutOfBounds { row, col });
        }
        Ok(row * self.cols + col)
    }

    /// Get the state of a cell.
    pub fn get(&self, row: usize, col: usize) -> Result<SquareState, SimulationError> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Whether the cell is dirty.
    pub fn is_dirty(&self, row: usize, col: usize) -> Result<bool, SimulationError> {
        Ok(self.get(row, col)? == SquareState::Dirty)
    }

    /// Mark a cell clean. Cleaning a clean cell does nothing.
    pub fn clean(&mut self, row: usize, col: usize) -> Result<(), SimulationError> {
        let index = self.index(row, col)?;
        if self.cells[index] == SquareState::Dirty {
            self.cells[index] = SquareState::Clean;
            self.dirty -= 1;
        }
        Ok(())
    }

    /// Number of clean cells.
    pub fn clean_count(&self) -> usize {
        self.cells.len() - self.dirty
    }

    /// Number of dirty cells.
    pub fn dirty_count(&self) -> usize {
        self.dirty
    }

    /// Percentage of clean cells, in [0, 100].
    pub fn clean_percentage(&self) -> f64 {
        100.0 * self.clean_count() as f64 / self.cells.len() as f64
    }

    /// Whether every cell is clean.
    pub fn is_all_clean(&self) -> bool {
        self.dirty == 0
    }

    /// The 8 Moore neighbors of a cell, wrapping at the edges. The center cell is not included.
    ///
    /// On rooms with fewer than 3 rows or columns some of the 8 coordinates name the same cell.
    /// They are kept so that picking uniformly over the result picks uniformly over directions.
    pub fn neighbors(&self, row: usize, col: usize) -> Result<[Position; 8], SimulationError> {
        self.index(row, col)?;
        Ok(MOORE_OFFSETS
            .map(|(dr, dc)| Position::new(wrap(row, dr, self.rows), wrap(col, dc, self.cols))))
    }

    /// Row-major iterator over every cell and its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, SquareState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &state)| (Position::new(i / self.cols, i % self.cols), state))
    }

    /// Render the room as text. `overlay` may replace the character drawn for a position, which
    /// is how callers draw agents on top of the floor.
    pub fn render_with<F>(&self, overlay: F) -> String
    where
        F: Fn(Position) -> Option<char>,
    {
        let mut s = String::with_capacity((self.cols * 2 + 3) * (self.rows + 1));

        // column numbers. recall there will be row numbers on the left.
        s.push_str("  ");
        for col in 0..self.cols {
            s.push_str(&format!("{}", col % 10));
            if col == self.cols - 1 {
                s.push('\n');
            } else {
                s.push(' ');
            }
        }

        for (position, state) in self.iter() {
            if position.col == 0 {
                s.push_str(&format!("{} ", position.row % 10));
            }
            let c = overlay(position).unwrap_or(match state {
                SquareState::Clean => '.',
                SquareState::Dirty => '#',
            });
            s.push(c);
            if position.col < self.cols - 1 {
                s.push(' ');
            } else if position.row < self.rows - 1 {
                s.push('\n');
            }
        }
        s
    }
}

fn wrap(value: usize, delta: isize, size: usize) -> usize {
    let size = size as isize;
    (value as isize + delta).rem_euclid(size) as usize
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;
    use crate::Rng;

    fn rng() -> Rng {
        Rng::seed_from_u64(42)
    }

    #[test]
    fn test_all_dirty_and_all_clean_extremes() {
        let mut rng = rng();
        let dirty = Grid::new(4, 5, 1.0, &mut rng).expect("grid failed");
        assert_eq!(dirty.dirty_count(), 20);
        assert_eq!(dirty.clean_count(), 0);
        assert_eq!(dirty.clean_percentage(), 0.0);

        let clean = Grid::new(4, 5, 0.0, &mut rng).expect("grid failed");
        assert_eq!(clean.dirty_count(), 0);
        assert_eq!(clean.clean_count(), 20);
        assert_eq!(clean.clean_percentage(), 100.0);
        assert!(clean.is_all_clean());
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let mut rng = rng();
        assert!(matches!(
            Grid::new(0, 5, 0.5, &mut rng),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Grid::new(5, 0, 0.5, &mut rng),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Grid::new(5, 5, 1.01, &mut rng),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_room_whose_cell_count_overflows_is_rejected() {
        let mut rng = rng();
        assert!(matches!(
            Grid::new(usize::MAX, 2, 0.5, &mut rng),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut grid = Grid::new(3, 3, 1.0, &mut rng()).expect("grid failed");
        grid.clean(1, 2).expect("clean failed");
        assert_eq!(grid.is_dirty(1, 2), Ok(false));
        assert_eq!(grid.clean_count(), 1);
        grid.clean(1, 2).expect("clean failed");
        assert_eq!(grid.clean_count(), 1);
        assert_eq!(grid.dirty_count(), 8);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(3, 4, 0.5, &mut rng()).expect("grid failed");
        assert_eq!(
            grid.is_dirty(3, 0),
            Err(SimulationError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            grid.clean(0, 4),
            Err(SimulationError::OutOfBounds { row: 0, col: 4 })
        );
        assert!(grid.neighbors(7, 7).is_err());
    }

    #[test]
    fn test_corner_neighbors_wrap_around() {
        let grid = Grid::new(5, 7, 0.0, &mut rng()).expect("grid failed");
        let neighbors = grid.neighbors(0, 0).expect("neighbors failed");
        assert!(neighbors.contains(&Position::new(4, 6)));
        assert!(neighbors.contains(&Position::new(4, 0)));
        assert!(neighbors.contains(&Position::new(0, 6)));
        assert!(neighbors.contains(&Position::new(1, 1)));
        assert!(!neighbors.contains(&Position::new(0, 0)));
    }

    #[test]
    fn test_small_room_neighbors_coincide() {
        let grid = Grid::new(1, 1, 0.0, &mut rng()).expect("grid failed");
        let neighbors = grid.neighbors(0, 0).expect("neighbors failed");
        assert!(neighbors.iter().all(|&p| p == Position::new(0, 0)));

        let grid = Grid::new(2, 2, 0.0, &mut rng()).expect("grid failed");
        let neighbors = grid.neighbors(0, 0).expect("neighbors failed");
        assert_eq!(neighbors.len(), 8);
        assert_eq!(
            neighbors
                .iter()
                .filter(|&&p| p == Position::new(1, 1))
                .count(),
            4
        );
    }

    #[test]
    fn test_from_states_and_render() {
        use SquareState::{Clean, Dirty};
        let grid = Grid::from_states(vec![vec![Dirty, Clean, Clean], vec![Clean, Clean, Dirty]])
            .expect("grid failed");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.dirty_count(), 2);
        assert_eq!(format!("{}", grid), "  0 1 2\n0 # . .\n1 . . #");
        let overlay = grid.render_with(|p| (p == Position::new(0, 0)).then_some('C'));
        assert_eq!(overlay, "  0 1 2\n0 C . .\n1 . . #");
    }

    #[test]
    fn test_from_states_rejects_ragged_rows() {
        use SquareState::{Clean, Dirty};
        assert!(Grid::from_states(vec![vec![Dirty, Clean], vec![Clean]]).is_err());
        assert!(Grid::from_states(vec![]).is_err());
    }

    proptest! {
        #[test]
        fn test_counts_always_cover_every_cell(
            rows in 1..12usize,
            cols in 1..12usize,
            dirty_fraction in 0.0..=1.0f64,
            seed in any::<u64>(),
            cleans in prop::collection::vec((0..12usize, 0..12usize), 0..40),
        ) {
            let mut rng = Rng::seed_from_u64(seed);
            let mut grid = Grid::new(rows, cols, dirty_fraction, &mut rng).expect("grid failed");
            prop_assert_eq!(grid.clean_count() + grid.dirty_count(), rows * cols);
            let mut last = grid.clean_percentage();
            for (row, col) in cleans {
                grid.clean(row % rows, col % cols).expect("clean failed");
                prop_assert_eq!(grid.clean_count() + grid.dirty_count(), rows * cols);
                let scanned = grid.iter().filter(|(_, s)| *s == SquareState::Dirty).count();
                prop_assert_eq!(scanned, grid.dirty_count());
                prop_assert!(grid.clean_percentage() >= last);
                last = grid.clean_percentage();
            }
        }

        #[test]
        fn test_neighbors_are_in_bounds_and_adjacent(
            rows in 1..10usize,
            cols in 1..10usize,
            row in 0..10usize,
            col in 0..10usize,
        ) {
            let grid = Grid::new(rows, cols, 0.0, &mut rng()).expect("grid failed");
            let (row, col) = (row % rows, col % cols);
            for p in grid.neighbors(row, col).expect("neighbors failed") {
                prop_assert!(p.row < rows && p.col < cols);
                let dr = (p.row + rows - row) % rows;
                let dc = (p.col + cols - col) % cols;
                prop_assert!(dr == 0 || dr == 1 || dr == rows - 1);
                prop_assert!(dc == 0 || dc == 1 || dc == cols - 1);
            }
        }
    }
}
