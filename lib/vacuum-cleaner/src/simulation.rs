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

//! The simulation engine: owns the room, the agents, the clock and the metrics.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::agent::CleaningAgent;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::grid::{Grid, Position};
use crate::metrics::{MetricsRecorder, MetricsSnapshot};
use crate::Rng;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
    /// `max_ticks` ticks were executed.
    TimeLimit,

    /// Every cell is clean. Takes precedence when the time limit was reached on the same tick.
    AllClean,
}

/// Result of a call to [`Simulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Every agent acted once and this snapshot was recorded.
    Advanced(MetricsSnapshot),

    /// The run is over; nothing changed.
    Stopped(StopReason),
}

/// A cleaning run.
///
/// Callers drive it by calling [`Simulation::tick`] until [`Simulation::is_done`], then read
/// [`Simulation::final_metrics`] or [`Simulation::history`]. The room and the agents are only
/// reachable through shared references so recorded metrics always match the state.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    agents: Vec<CleaningAgent>,
    activation_order: Vec<usize>,
    rng: Rng,
    elapsed_ticks: u64,
    running: bool,
    metrics: MetricsRecorder,
}

impl Simulation {
    /// Create a run from `config`. The generator is seeded from `config.seed` when present and
    /// from entropy otherwise.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = match config.seed {
            Some(seed) => Rng::seed_from_u64(seed),
            None => Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a run that draws all of its randomness from `rng`.
    pub fn with_rng(config: SimulationConfig, mut rng: Rng) -> Result<Self, SimulationError> {
        let grid = Grid::new(config.rows, config.cols, config.dirty_fraction, &mut rng)?;
        config.validate()?;

        let agents = (0..config.num_agents)
            .map(|id| CleaningAgent::new(id, Position::new(0, 0)))
            .collect();
        debug!(
            rows = config.rows,
            cols = config.cols,
            num_agents = config.num_agents,
            dirty_cells = grid.dirty_count(),
            max_ticks = config.max_ticks,
            "simulation initialized"
        );

        Ok(Self {
            activation_order: (0..config.num_agents).collect(),
            config,
            grid,
            agents,
            rng,
            elapsed_ticks: 0,
            running: true,
            metrics: MetricsRecorder::new(),
        })
    }

    /// Advance one tick.
    ///
    /// If the tick budget is spent or the room is already clean the run stops and nothing is
    /// recorded; calling again keeps returning [`TickOutcome::Stopped`]. Otherwise every agent
    /// acts once, in an order reshuffled on every tick, and a snapshot of the result is recorded.
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        if let Some(reason) = self.termination_condition() {
            if self.running {
                self.running = false;
                info!(
                    elapsed_ticks = self.elapsed_ticks,
                    clean_percentage = self.grid.clean_percentage(),
                    ?reason,
                    "simulation stopped"
                );
            }
            return Ok(TickOutcome::Stopped(reason));
        }

        self.activation_order.shuffle(&mut self.rng);
        for &index in self.activation_order.iter() {
            let agent = &mut self.agents[index];
            let action = agent.act(&mut self.grid, &mut self.rng)?;
            trace!(agent = agent.id(), ?action, "agent acted");
        }
        self.elapsed_ticks += 1;

        let snapshot = self
            .metrics
            .collect(&self.grid, &self.agents, self.elapsed_ticks);
        debug!(
            tick = snapshot.elapsed_ticks,
            clean_percentage = snapshot.clean_percentage,
            total_movements = snapshot.total_movements,
            "tick complete"
        );
        Ok(TickOutcome::Advanced(snapshot))
    }

    /// Tick until the run stops, then return the recorded history.
    pub fn run_to_completion(&mut self) -> Result<&[MetricsSnapshot], SimulationError> {
        while !self.is_done() {
            self.tick()?;
        }
        Ok(self.metrics.history())
    }

    fn termination_condition(&self) -> Option<StopReason> {
        if self.grid.is_all_clean() {
            Some(StopReason::AllClean)
        } else if self.elapsed_ticks >= self.config.max_ticks {
            Some(StopReason::TimeLimit)
        } else {
            None
        }
    }

    /// Whether the run has stopped. Only a call to [`Simulation::tick`] can stop it.
    pub fn is_done(&self) -> bool {
        !self.running
    }

    /// Why the run stopped, or `None` while it is still running.
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.running {
            None
        } else {
            self.termination_condition()
        }
    }

    /// The last recorded snapshot.
    ///
    /// Fails with [`SimulationError::NoDataAvailable`] when no tick ran, e.g. when the room
    /// started clean. Use [`Simulation::current_metrics`] for the state in that case.
    pub fn final_metrics(&self) -> Result<MetricsSnapshot, SimulationError> {
        self.metrics
            .latest()
            .copied()
            .ok_or(SimulationError::NoDataAvailable)
    }

    /// The last recorded snapshot, if any.
    pub fn latest_metrics(&self) -> Option<&MetricsSnapshot> {
        self.metrics.latest()
    }

    /// Statistics for the present state. Not recorded.
    pub fn current_metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot::of(&self.grid, &self.agents, self.elapsed_ticks)
    }

    /// One snapshot per executed tick, oldest first.
    pub fn history(&self) -> &[MetricsSnapshot] {
        self.metrics.history()
    }

    /// The room.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The agents, ordered by id.
    pub fn agents(&self) -> &[CleaningAgent] {
        &self.agents
    }

    /// The configuration the run was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks executed so far.
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Render the room with agents drawn on top: `C` where an agent just cleaned, `A` otherwise.
    pub fn render(&self) -> String {
        self.grid.render_with(|position| {
            let mut here = self.agents.iter().filter(|a| a.position() == position);
            let first = here.next()?;
            if first.is_cleaning() || here.any(CleaningAgent::is_cleaning) {
                Some('C')
            } else {
                Some('A')
            }
        })
    }
}
