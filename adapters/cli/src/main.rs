#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a scripted Path Defence session.

mod scenario;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use path_defence_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::{Runner, Scenario, DEFAULT_SCENARIO};

/// Command-line arguments accepted by the headless driver.
#[derive(Debug, Parser)]
#[command(name = "path-defence", about = "Replays a Path Defence scenario headlessly")]
struct CliArgs {
    /// TOML scenario to replay; the bundled demo runs when omitted.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Overrides the spawn RNG seed from the scenario.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated milliseconds advanced per tick.
    #[arg(long, value_name = "MS", default_value_t = 100)]
    step_ms: u64,
}

/// Entry point for the Path Defence command-line interface.
fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("path_defence=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let args = CliArgs::parse();
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::parse(DEFAULT_SCENARIO).context("bundled scenario is malformed")?,
    };
    if let Some(seed) = args.seed {
        scenario.config.rng_seed = seed;
    }

    let runner = Runner::new(scenario.config, Duration::from_millis(args.step_ms))?;
    let world = runner.world();
    println!(
        "Path Defence: {} waves, {}-cell path, {} coins, base health {}",
        query::wave_count(world),
        query::plan_validity(world).required,
        query::coins(world),
        query::base_health(world)
    );
    info!(
        actions = scenario.actions.len(),
        step_ms = args.step_ms,
        "scenario_started"
    );

    let summary = runner.run(&scenario.actions)?;
    println!("{summary}");
    Ok(())
}
