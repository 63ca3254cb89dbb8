// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the courier workspace.
//!
//! - `cargo xtask ci` runs lints, the build, the tests and the demo scenario
//! - `cargo xtask simulate` runs the simulator over a scenario file and
//!   fails if any step was rejected when `--strict` is given

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, path::PathBuf, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Scenario run by `ci` and by `simulate` when no path is given.
const DEMO_SCENARIO: &str = "demos/scenario.json";

/// Package that builds the simulator binary.
const SIMULATOR_PACKAGE: &str = "courier-sim";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, demo scenario)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run the simulator over a scenario file
    #[command(visible_alias = "sim")]
    Simulate(SimulateArgs),

    /// Run tests
    #[command(visible_alias = "t")]
    Test,
}

#[derive(Clone, Debug, ClapArgs)]
struct SimulateArgs {
    /// Scenario file to run
    #[arg(default_value = DEMO_SCENARIO)]
    scenario: PathBuf,

    /// Fail if any step is rejected
    #[arg(long)]
    strict: bool,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Lint => lint(),
            Self::Simulate(args) => simulate(&args),
            Self::Test => test(),
        }
    }
}

/// Run CI checks (lint, build, test, demo scenario)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    simulate(&SimulateArgs {
        scenario: PathBuf::from(DEMO_SCENARIO),
        strict: false,
    })?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Lint formatting, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Run the simulator and summarize its report
///
/// The report goes to stdout as JSON; this reads it back to count rejected
/// steps.
fn simulate(args: &SimulateArgs) -> Result<()> {
    let scenario: String = args.scenario.display().to_string();
    let output: Output = cmd(
        "cargo",
        [
            "run",
            "--quiet",
            "--package",
            SIMULATOR_PACKAGE,
            "--",
            "--scenario",
            scenario.as_str(),
        ],
    )
    .stdout_capture()
    .run_with_trace()?;

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).wrap_err("simulator printed an invalid report")?;
    let steps: usize = report["steps"].as_array().map_or(0, Vec::len);
    let rejected: usize = report["steps"].as_array().map_or(0, |steps| {
        steps
            .iter()
            .filter(|step| step["status"] == "rejected")
            .count()
    });
    tracing::info!(scenario = %scenario, steps, rejected, "scenario finished");

    if args.strict && rejected > 0 {
        return Err(eyre!("{rejected} of {steps} steps were rejected in {scenario}"));
    }
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
