use anyhow::Context;
use clap::Parser;
use simkit_core::config::load_config;
use simkit_demo::args::Cli;
use simkit_demo::{DemoConfig, Simulation};
use simkit_logger::Logger;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg: DemoConfig = match &cli.config {
        Some(path) => load_config(Some(path)).context("Critical: Configuration is malformed")?,
        None => DemoConfig::default(),
    };
    cli.apply(&mut cfg);

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    let report = Simulation::builder().config(cfg).build()?.run()?;

    info!(
        vehicles = report.vehicles,
        obstacles = report.obstacles,
        transmitters = report.transmitters,
        blocked_area = report.blocked_area,
        coverage = report.coverage,
        "Models after retirement"
    );
    Ok(())
}
