// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod runner;
mod scenario;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use courier_dispatch::DispatchState;
use time::OffsetDateTime;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::runner::{RunReport, Simulator};
use crate::scenario::Scenario;

/// Courier network simulator - runs a dispatch scenario and prints the results as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario JSON file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Number of paths returned by alternative route steps that do not set `count`
    #[arg(long, default_value_t = 3)]
    max_alternatives: usize,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // RUST_LOG wins over the verbosity flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(scenario = %args.scenario.display(), "Loading scenario");
    let scenario: Scenario = Scenario::load(&args.scenario)
        .wrap_err_with(|| format!("failed to load scenario {}", args.scenario.display()))?;
    let state: DispatchState = scenario.initial_state()?;
    let start_at: OffsetDateTime = scenario.start_at.unwrap_or_else(OffsetDateTime::now_utc);

    let simulator: Simulator = Simulator::new(
        state,
        scenario.operator.clone(),
        start_at,
        args.max_alternatives,
    );
    info!(
        cities = simulator.state().cities().len(),
        parcels = simulator.state().parcels().len(),
        riders = simulator.state().riders().len(),
        steps = scenario.steps.len(),
        "Starting simulation"
    );

    let report: RunReport = simulator.run(&scenario.steps)?;
    info!(
        steps = report.steps.len(),
        rejected = report.rejected_count(),
        events = report.operation_log.len(),
        "Simulation finished"
    );

    let output: String = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}
