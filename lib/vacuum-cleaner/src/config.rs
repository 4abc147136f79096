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

//! Construction parameters for a cleaning run.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Parameters for a [`crate::Simulation`].
///
/// Unknown fields are rejected when deserializing. `M` and `N` are accepted as aliases of `rows`
/// and `cols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of rows in the room (M).
    #[serde(alias = "M")]
    pub rows: usize,

    /// Number of columns in the room (N).
    #[serde(alias = "N")]
    pub cols: usize,

    /// Number of cleaning agents, all starting at (0, 0).
    pub num_agents: usize,

    /// Probability in [0, 1] that each cell starts dirty.
    pub dirty_fraction: f64,

    /// Upper bound on executed ticks.
    pub max_ticks: u64,

    /// Seed for the run's random generator. Seeded from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            num_agents: 10,
            dirty_fraction: 0.5,
            max_ticks: 20,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter: room dimensions, dirt probability, agent count and tick budget.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_room(self.rows, self.cols, self.dirty_fraction)?;
        if self.num_agents == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "num_agents must be positive".to_string(),
            ));
        }
        if self.max_ticks == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "max_ticks must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check the room dimensions and return the number of cells.
pub(crate) fn validate_dimensions(rows: usize, cols: usize) -> Result<usize, SimulationError> {
    if rows == 0 || cols == 0 {
        return Err(SimulationError::InvalidConfiguration(format!(
            "room must be at least 1x1, got {}x{}",
            rows, cols
        )));
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= isize::MAX as usize => Ok(cells),
        _ => Err(SimulationError::InvalidConfiguration(format!(
            "room of {}x{} cells is too large",
            rows, cols
        ))),
    }
}

/// Check the room dimensions and the dirt probability, returning the number of cells.
pub(crate) fn validate_room(
    rows: usize,
    cols: usize,
    dirty_fraction: f64,
) -> Result<usize, SimulationError> {
    let cells = validate_dimensions(rows, cols)?;
    if !(0.0..=1.0).contains(&dirty_fraction) {
        return Err(SimulationError::InvalidConfiguration(format!(
            "dirty_fraction must be within [0, 1], got {}",
            dirty_fraction
        )));
    }
    Ok(cells)
}
