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

#![warn(missing_docs)]

//! Reactive cleaning agents on a toroidal grid room.
//!
//! A [`Simulation`] owns a [`Grid`] of dirty and clean cells and a set of
//! [`CleaningAgent`]s. On every tick each agent, in a freshly shuffled order,
//! either cleans the cell it stands on or wanders to a random Moore neighbor.
//! A [`MetricsSnapshot`] is recorded after every tick until the room is clean
//! or the tick budget runs out.
//!
//! The library is single-threaded and all randomness flows through one
//! seedable [`Rng`] owned by the simulation, so a seeded run is reproducible.
//!
//! ```
//! use vacuum_cleaner::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     seed: Some(7),
//!     ..SimulationConfig::default()
//! };
//! let mut simulation = Simulation::new(config).unwrap();
//! let history = simulation.run_to_completion().unwrap();
//! assert!(history.len() <= 20);
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod simulation;

pub use agent::{CleaningAction, CleaningAgent, LocalPercept};
pub use config::SimulationConfig;
pub use error::SimulationError;
pub use grid::{Grid, Position, SquareState};
pub use metrics::{MetricsRecorder, MetricsSnapshot};
pub use simulation::{Simulation, StopReason, TickOutcome};

/// Random number generator shared by room initialization, agent movement and
/// activation order.
pub type Rng = rand_pcg::Pcg64;
