use serde::Deserialize;
use simkit_core::RegistryConfig;
use simkit_logger::LoggingConfig;

/// Shape of the demo scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub vehicles: usize,
    pub obstacles: usize,
    /// Entities no model accepts.
    pub birds: usize,
    pub ticks: u32,
    pub tick_seconds: f64,
    /// Radio channels of the comms model; extra transmitters are rejected.
    pub channels: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self { vehicles: 8, obstacles: 6, birds: 2, ticks: 10, tick_seconds: 1.0, channels: 4 }
    }
}

/// Root of the demo's config file (`--config simkit.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
    pub scenario: ScenarioConfig,
}
