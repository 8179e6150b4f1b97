//! Subsystems of the demo scene.
//!
//! Each model keeps its own entities behind a `parking_lot` lock so the registry can route
//! through `&self`. Unregistering an unknown entity is a no-op everywhere.

use crate::world::{Obstacle, Transmitter, Vehicle};
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use simkit_core::{Model, ModelError};
use std::borrow::Cow;
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::debug;

/// Moves every registered vehicle along the road.
#[derive(Debug, Default)]
pub struct RoadModel {
    vehicles: RwLock<FxHashMap<u32, Arc<dyn Vehicle>>>,
    odometer: Mutex<f64>,
}

impl RoadModel {
    /// Advances all vehicles by `seconds`; returns the distance covered in this step.
    pub fn advance(&self, seconds: f64) -> f64 {
        let step: f64 = self.vehicles.read().values().map(|v| v.speed() * seconds).sum();
        *self.odometer.lock() += step;
        step
    }

    #[must_use]
    pub fn odometer(&self) -> f64 {
        *self.odometer.lock()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.read().len()
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.vehicles.read().contains_key(&id)
    }
}

impl Model for RoadModel {
    type Target = dyn Vehicle;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("road")
    }

    fn register(&self, vehicle: Arc<dyn Vehicle>) -> Result<(), ModelError> {
        self.vehicles.write().insert(vehicle.id(), vehicle);
        Ok(())
    }

    fn unregister(&self, vehicle: Arc<dyn Vehicle>) -> Result<(), ModelError> {
        self.vehicles.write().remove(&vehicle.id());
        Ok(())
    }
}

/// Tracks the road surface blocked by obstacles.
#[derive(Debug, Default)]
pub struct CollisionModel {
    obstacles: RwLock<FxHashMap<u32, Arc<dyn Obstacle>>>,
}

impl CollisionModel {
    #[must_use]
    pub fn blocked_area(&self) -> f64 {
        self.obstacles.read().values().map(|o| PI * o.radius().powi(2)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.read().len()
    }
}

impl Model for CollisionModel {
    type Target = dyn Obstacle;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("collision")
    }

    fn register(&self, obstacle: Arc<dyn Obstacle>) -> Result<(), ModelError> {
        if obstacle.radius() <= 0.0 {
            return Err(ModelError::rejected(format!(
                "obstacle {} has no extent",
                obstacle.id()
            )));
        }
        self.obstacles.write().insert(obstacle.id(), obstacle);
        Ok(())
    }

    fn unregister(&self, obstacle: Arc<dyn Obstacle>) -> Result<(), ModelError> {
        self.obstacles.write().remove(&obstacle.id());
        Ok(())
    }
}

/// Radio network with a fixed number of channels.
#[derive(Debug)]
pub struct CommModel {
    channels: usize,
    transmitters: RwLock<FxHashMap<u32, Arc<dyn Transmitter>>>,
}

impl CommModel {
    #[must_use]
    pub fn new(channels: usize) -> Self {
        Self { channels, transmitters: RwLock::default() }
    }

    /// Sum of the ranges of all connected transmitters.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        self.transmitters.read().values().map(|t| t.range()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transmitters.read().len()
    }
}

impl Model for CommModel {
    type Target = dyn Transmitter;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("comms")
    }

    fn register(&self, transmitter: Arc<dyn Transmitter>) -> Result<(), ModelError> {
        let mut transmitters = self.transmitters.write();
        if transmitters.len() >= self.channels && !transmitters.contains_key(&transmitter.id()) {
            debug!(id = transmitter.id(), channels = self.channels, "No free channel");
            return Err(ModelError::rejected(format!(
                "all {} channels busy, transmitter {} not connected",
                self.channels,
                transmitter.id()
            )));
        }
        transmitters.insert(transmitter.id(), transmitter);
        Ok(())
    }

    fn unregister(&self, transmitter: Arc<dyn Transmitter>) -> Result<(), ModelError> {
        self.transmitters.write().remove(&transmitter.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Beacon, Car, Rock};

    #[test]
    fn road_accumulates_distance() {
        let road = RoadModel::default();
        road.register(Arc::new(Car { id: 1, speed: 10.0 })).unwrap();
        road.register(Arc::new(Car { id: 2, speed: 5.0 })).unwrap();

        assert!((road.advance(2.0) - 30.0).abs() < f64::EPSILON);
        assert!((road.advance(1.0) - 15.0).abs() < f64::EPSILON);
        assert!((road.odometer() - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_vehicle_unregisters_silently() {
        let road = RoadModel::default();
        road.unregister(Arc::new(Car { id: 9, speed: 1.0 })).unwrap();
        assert_eq!(road.len(), 0);
    }

    #[test]
    fn flat_obstacle_is_rejected() {
        let collision = CollisionModel::default();
        let err = collision.register(Arc::new(Rock { id: 1, radius: 0.0 })).unwrap_err();
        assert!(matches!(err, ModelError::Rejected { .. }));
        assert_eq!(collision.len(), 0);
    }

    #[test]
    fn comms_refuse_beyond_channel_count() {
        let comms = CommModel::new(1);
        let first = Arc::new(Beacon { id: 1, radius: 0.5, range: 10.0 });
        comms.register(Arc::<Beacon>::clone(&first)).unwrap();
        // Re-registering an already connected transmitter does not need a new channel.
        comms.register(first).unwrap();

        let err = comms.register(Arc::new(Beacon { id: 2, radius: 0.5, range: 10.0 })).unwrap_err();
        assert!(err.to_string().contains("channels busy"));
        assert_eq!(comms.len(), 1);
        assert!((comms.coverage() - 10.0).abs() < f64::EPSILON);
    }
}
