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

//! The reflex cleaning agent.

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::grid::{Grid, Position, SquareState};
use crate::Rng;

/// What the agent senses on a tick: the state of the cell below it and where it could go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPercept {
    /// Where the agent stands.
    pub position: Position,

    /// State of the cell at `position`.
    pub square_state: SquareState,

    /// Moore neighbors of `position`, with wraparound.
    pub neighbors: [Position; 8],
}

/// The outcome of one agent's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CleaningAction {
    /// Cleaned the cell the agent stands on.
    Clean(Position),

    /// Moved to a neighboring cell.
    Move {
        /// Cell the agent left.
        from: Position,

        /// Cell the agent arrived at.
        to: Position,
    },
}

/// A purely reactive cleaner. Each tick it either cleans its cell or moves, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningAgent {
    id: usize,
    position: Position,
    movement_count: u64,
    is_cleaning: bool,
}

impl CleaningAgent {
    /// Create an agent at `position` that has not moved yet.
    pub fn new(id: usize, position: Position) -> Self {
        Self {
            id,
            position,
            movement_count: 0,
            is_cleaning: false,
        }
    }

    /// Identifier, unique within a run.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of moves made so far.
    pub fn movement_count(&self) -> u64 {
        self.movement_count
    }

    /// Whether the agent spent its last turn cleaning.
    pub fn is_cleaning(&self) -> bool {
        self.is_cleaning
    }

    /// Sense the cell under the agent.
    pub fn perceive(&self, grid: &Grid) -> Result<LocalPercept, SimulationError> {
        let Position { row, col } = self.position;
        Ok(LocalPercept {
            position: self.position,
            square_state: grid.get(row, col)?,
            neighbors: grid.neighbors(row, col)?,
        })
    }

    /// Reflex rule: clean a dirty cell, otherwise pick one of the 8 neighbors uniformly.
    pub fn decide(percept: &LocalPercept, rng: &mut Rng) -> CleaningAction {
        match percept.square_state {
            SquareState::Dirty => CleaningAction::Clean(percept.position),
            SquareState::Clean => {
                let to = percept.neighbors[rng.gen_range(0..percept.neighbors.len())];
                CleaningAction::Move {
                    from: percept.position,
                    to,
                }
            }
        }
    }

    /// Take one turn: sense, decide and apply the action to the room or to the agent itself.
    pub fn act(
        &mut self,
        grid: &mut Grid,
        rng: &mut Rng,
    ) -> Result<CleaningAction, SimulationError> {
        let percept = self.perceive(grid)?;
        let action = Self::decide(&percept, rng);
        match action {
            CleaningAction::Clean(position) => {
                self.is_cleaning = true;
                grid.clean(position.row, position.col)?;
            }
            CleaningAction::Move { to, .. } => {
                self.is_cleaning = false;
                self.position = to;
                self.movement_count += 1;
            }
        }
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> Rng {
        Rng::seed_from_u64(42)
    }

    #[test]
    fn test_dirty_cell_is_cleaned_without_moving() {
        let mut rng = rng();
        let mut grid = Grid::new(3, 3, 1.0, &mut rng).expect("grid failed");
        let mut agent = CleaningAgent::new(0, Position::new(1, 1));

        let action = agent.act(&mut grid, &mut rng).expect("act failed");

        assert_eq!(action, CleaningAction::Clean(Position::new(1, 1)));
        assert!(agent.is_cleaning());
        assert_eq!(agent.position(), Position::new(1, 1));
        assert_eq!(agent.movement_count(), 0);
        assert_eq!(grid.is_dirty(1, 1), Ok(false));
        assert_eq!(grid.clean_count(), 1);
    }

    #[test]
    fn test_clean_cell_means_move_to_neighbor() {
        let mut rng = rng();
        let mut grid = Grid::new(4, 4, 0.0, &mut rng).expect("grid failed");
        let mut agent = CleaningAgent::new(0, Position::new(0, 0));
        let neighbors = grid.neighbors(0, 0).expect("neighbors failed");

        let action = agent.act(&mut grid, &mut rng).expect("act failed");

        assert!(!agent.is_cleaning());
        assert_eq!(agent.movement_count(), 1);
        assert!(neighbors.contains(&agent.position()));
        assert_eq!(
            action,
            CleaningAction::Move {
                from: Position::new(0, 0),
                to: agent.position()
            }
        );
        assert_eq!(grid.clean_count(), 16);
    }

    #[test]
    fn test_clean_then_move() {
        let mut rng = rng();
        let mut grid = Grid::new(3, 3, 1.0, &mut rng).expect("grid failed");
        let mut agent = CleaningAgent::new(0, Position::new(2, 2));

        agent.act(&mut grid, &mut rng).expect("act failed");
        assert!(agent.is_cleaning());
        agent.act(&mut grid, &mut rng).expect("act failed");
        assert!(!agent.is_cleaning());
        assert_eq!(agent.movement_count(), 1);
        assert_ne!(agent.position(), Position::new(2, 2));
    }

    #[test]
    fn test_every_direction_gets_chosen() {
        let mut rng = rng();
        let percept = LocalPercept {
            position: Position::new(2, 2),
            square_state: SquareState::Clean,
            neighbors: Grid::new(5, 5, 0.0, &mut rng)
                .expect("grid failed")
                .neighbors(2, 2)
                .expect("neighbors failed"),
        };
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            if let CleaningAction::Move { to, .. } = CleaningAgent::decide(&percept, &mut rng) {
                seen.insert(to);
            }
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_agent_off_the_room_reports_out_of_bounds() {
        let mut rng = rng();
        let mut grid = Grid::new(2, 2, 0.5, &mut rng).expect("grid failed");
        let mut agent = CleaningAgent::new(0, Position::new(5, 0));
        assert_eq!(
            agent.act(&mut grid, &mut rng),
            Err(SimulationError::OutOfBounds { row: 5, col: 0 })
        );
    }
}
