//! # simkit demo
//!
//! Plays the simulation loop around a [`ModelRegistry`]: composes three models, configures the
//! registry, spawns a deterministic scene, advances it, then retires half of it.
//!
//! ## Example
//! ```rust
//! use simkit_demo::{DemoConfig, Simulation};
//!
//! # fn main() -> anyhow::Result<()> {
//! let report = Simulation::builder().config(DemoConfig::default()).vehicles(4).build()?.run()?;
//! assert_eq!(report.unmatched, 2);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod config;
pub mod models;
pub mod world;

pub use crate::config::{DemoConfig, ScenarioConfig};

use crate::models::{CollisionModel, CommModel, RoadModel};
use simkit_core::{Entity, ModelRegistry, RegistryError};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A fluent builder for the [`Simulation`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct SimulationBuilder {
    cfg: DemoConfig,
}

impl SimulationBuilder {
    pub fn config(mut self, cfg: DemoConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub const fn vehicles(mut self, vehicles: usize) -> Self {
        self.cfg.scenario.vehicles = vehicles;
        self
    }

    pub const fn obstacles(mut self, obstacles: usize) -> Self {
        self.cfg.scenario.obstacles = obstacles;
        self
    }

    pub const fn channels(mut self, channels: usize) -> Self {
        self.cfg.scenario.channels = channels;
        self
    }

    /// Adds the road, collision and comms models (in that order) and configures the registry.
    ///
    /// # Errors
    /// Propagates [`RegistryError`] from composition; none is expected for a fresh registry.
    pub fn build(self) -> Result<Simulation, RegistryError> {
        let road = Arc::new(RoadModel::default());
        let collision = Arc::new(CollisionModel::default());
        let comms = Arc::new(CommModel::new(self.cfg.scenario.channels));

        let mut registry = ModelRegistry::with_config(self.cfg.registry);
        registry.add_model(Arc::clone(&road))?;
        registry.add_model(Arc::clone(&collision))?;
        registry.add_model(Arc::clone(&comms))?;
        registry.configure()?;

        for entry in registry.models() {
            debug!(model = entry.name(), capability = %entry.capability(), "Model ready");
        }

        Ok(Simulation { registry, road, collision, comms, scenario: self.cfg.scenario })
    }
}

/// Outcome of one [`Simulation::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Entities accepted by every model they reached.
    pub registered: usize,
    /// Entities no model was interested in.
    pub unmatched: usize,
    /// Entities refused by a model; models before it in dispatch order keep them.
    pub rejected: usize,
    pub unregistered: usize,
    pub distance: f64,
    pub vehicles: usize,
    pub obstacles: usize,
    pub transmitters: usize,
    pub blocked_area: f64,
    pub coverage: f64,
}

/// A configured registry plus handles on its models.
#[derive(Debug)]
pub struct Simulation {
    registry: ModelRegistry,
    road: Arc<RoadModel>,
    collision: Arc<CollisionModel>,
    comms: Arc<CommModel>,
    scenario: ScenarioConfig,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    /// Spawns the scene, advances it `ticks` times and retires every other entity.
    ///
    /// Model rejections are counted and logged; the run goes on without that entity.
    ///
    /// # Errors
    /// Any other [`RegistryError`] aborts the run.
    pub fn run(&self) -> Result<Report, RegistryError> {
        let population = world::populate(&self.scenario);
        let mut report = Report::default();

        info!(
            registry = self.registry.name(),
            entities = population.len(),
            ticks = self.scenario.ticks,
            "Spawning scene"
        );

        for entity in &population {
            self.spawn(entity, &mut report)?;
        }

        for tick in 0..self.scenario.ticks {
            let step = self.road.advance(self.scenario.tick_seconds);
            trace!(tick, step, "Tick");
        }
        report.distance = self.road.odometer();

        for entity in population.iter().step_by(2) {
            if self.registry.unregister(entity)? {
                report.unregistered += 1;
            }
        }

        report.vehicles = self.road.len();
        report.obstacles = self.collision.len();
        report.transmitters = self.comms.len();
        report.blocked_area = self.collision.blocked_area();
        report.coverage = self.comms.coverage();

        info!(
            registered = report.registered,
            unmatched = report.unmatched,
            rejected = report.rejected,
            unregistered = report.unregistered,
            distance = report.distance,
            "Scene finished"
        );
        Ok(report)
    }

    fn spawn(&self, entity: &Arc<dyn Entity>, report: &mut Report) -> Result<(), RegistryError> {
        match self.registry.register(entity) {
            Ok(true) => report.registered += 1,
            Ok(false) => report.unmatched += 1,
            Err(RegistryError::ModelFailure { model, entity: name, entity_id, source, .. }) => {
                warn!(%model, entity = name, id = ?entity_id, %source, "Entity rejected");
                report.rejected += 1;
            },
            Err(e) => return Err(e),
        }
        Ok(())
    }

    #[must_use]
    pub const fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }
}
