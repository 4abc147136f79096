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

//! Per-tick aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::agent::CleaningAgent;
use crate::grid::Grid;

/// Aggregate statistics for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Percentage of clean cells, in [0, 100].
    pub clean_percentage: f64,

    /// Sum of every agent's movement count.
    pub total_movements: u64,

    /// Ticks executed when the snapshot was taken.
    pub elapsed_ticks: u64,

    /// Number of clean cells.
    pub clean_cells: usize,

    /// Number of dirty cells.
    pub dirty_cells: usize,
}

impl MetricsSnapshot {
    /// Compute a snapshot of the given state without recording it.
    pub fn of(grid: &Grid, agents: &[CleaningAgent], elapsed_ticks: u64) -> Self {
        Self {
            clean_percentage: grid.clean_percentage(),
            total_movements: agents.iter().map(CleaningAgent::movement_count).sum(),
            elapsed_ticks,
            clean_cells: grid.clean_count(),
            dirty_cells: grid.dirty_count(),
        }
    }
}

/// Append-only, chronological store of snapshots, one per completed tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecorder {
    history: Vec<MetricsSnapshot>,
}

impl MetricsRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the state and append it.
    pub fn collect(
        &mut self,
        grid: &Grid,
        agents: &[CleaningAgent],
        elapsed_ticks: u64,
    ) -> MetricsSnapshot {
        let snapshot = MetricsSnapshot::of(grid, agents, elapsed_ticks);
        self.history.push(snapshot);
        snapshot
    }

    /// Every recorded snapshot, oldest first.
    pub fn history(&self) -> &[MetricsSnapshot] {
        &self.history
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<&MetricsSnapshot> {
        self.history.last()
    }
}
