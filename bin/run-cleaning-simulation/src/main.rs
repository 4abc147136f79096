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

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vacuum_cleaner::{MetricsSnapshot, Simulation, SimulationConfig, StopReason, TickOutcome};

const SEED_ENV_VAR: &str = "CLEANING_SIM_SEED";

#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a SimulationConfig,
    stop_reason: Option<StopReason>,
    final_metrics: MetricsSnapshot,
    history: &'a [MetricsSnapshot],
}

// Load the configuration from the JSON file named by the first argument, or use the defaults.
// CLEANING_SIM_SEED overrides the seed either way.
fn load_config() -> anyhow::Result<SimulationConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            SimulationConfig::from_json_str(&contents)
                .with_context(|| format!("failed to load config file {}", path))?
        }
        None => SimulationConfig::default(),
    };
    if let Ok(seed) = std::env::var(SEED_ENV_VAR) {
        let seed = seed
            .parse::<u64>()
            .with_context(|| format!("{} must be an unsigned integer", SEED_ENV_VAR))?;
        config.seed = Some(seed);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    info!(?config, "starting");
    let mut simulation = Simulation::new(config)?;

    println!("{}\n", simulation.render());
    while let TickOutcome::Advanced(snapshot) = simulation.tick()? {
        println!(
            "tick {}: {:.2}% clean, {} dirty, {} moves",
            snapshot.elapsed_ticks,
            snapshot.clean_percentage,
            snapshot.dirty_cells,
            snapshot.total_movements
        );
        println!("{}\n", simulation.render());
    }

    // a room that starts clean never records a tick, so report the state as it is.
    let final_metrics = simulation
        .final_metrics()
        .unwrap_or_else(|_| simulation.current_metrics());
    let report = Report {
        config: simulation.config(),
        stop_reason: simulation.stop_reason(),
        final_metrics,
        history: simulation.history(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
