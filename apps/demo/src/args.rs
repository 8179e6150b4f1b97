//! # CLI Arguments

use crate::config::DemoConfig;
use clap::Parser;
use std::path::PathBuf;

/// Command-line overrides, applied on top of the config file.
#[derive(Debug, Parser)]
#[command(name = "simkit-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Routes a generated traffic scene through a simkit model registry")]
pub struct Cli {
    /// Config file (TOML, YAML or JSON); `SIMKIT__*` variables override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Number of vehicles to spawn
    #[arg(long, value_name = "N")]
    pub vehicles: Option<usize>,
    /// Number of obstacles to spawn
    #[arg(long, value_name = "N")]
    pub obstacles: Option<usize>,
    /// Default log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
    /// Log JSON lines instead of compact text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn apply(&self, cfg: &mut DemoConfig) {
        if let Some(vehicles) = self.vehicles {
            cfg.scenario.vehicles = vehicles;
        }
        if let Some(obstacles) = self.obstacles {
            cfg.scenario.obstacles = obstacles;
        }
        if let Some(level) = &self.log_level {
            cfg.logging.level.clone_from(level);
        }
        if self.json {
            cfg.logging.json = true;
        }
    }
}
