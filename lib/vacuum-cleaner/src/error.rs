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

//! Errors reported by the simulation.

/// Cleaning simulation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// Construction parameters are unusable. Fatal, never retried.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A coordinate outside the room was addressed. Agent movement wraps around the room, so this
    /// only happens through a logic defect.
    #[error("cell out of bounds: ({row}, {col})")]
    OutOfBounds {
        /// Requested row.
        row: usize,

        /// Requested column.
        col: usize,
    },

    /// Metrics were requested before any tick ran.
    #[error("no metrics recorded yet")]
    NoDataAvailable,
}

impl From<serde_json::Error> for SimulationError {
    fn from(e: serde_json::Error) -> Self {
        SimulationError::InvalidConfiguration(e.to_string())
    }
}
