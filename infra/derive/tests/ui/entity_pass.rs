use simkit_core::{Entity, Model, ModelError, ModelRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

trait Vehicle: Send + Sync {
    fn serial(&self) -> u32;
}

trait Transmitter: Send + Sync {
    fn range(&self) -> f64;
}

#[derive(Debug, Entity)]
#[entity(capabilities(dyn Vehicle, dyn Transmitter), id = serial)]
struct Ambulance {
    serial: u32,
}

impl Vehicle for Ambulance {
    fn serial(&self) -> u32 {
        self.serial
    }
}

impl Transmitter for Ambulance {
    fn range(&self) -> f64 {
        50.0
    }
}

#[derive(Debug, Default)]
struct Road(AtomicU32);

impl Model for Road {
    type Target = dyn Vehicle;

    fn register(&self, vehicle: Arc<dyn Vehicle>) -> Result<(), ModelError> {
        self.0.store(vehicle.serial(), Ordering::Relaxed);
        Ok(())
    }

    fn unregister(&self, _: Arc<dyn Vehicle>) -> Result<(), ModelError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Radio(AtomicU32);

impl Model for Radio {
    type Target = dyn Transmitter;

    fn register(&self, transmitter: Arc<dyn Transmitter>) -> Result<(), ModelError> {
        if transmitter.range() > 0.0 {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    fn unregister(&self, _: Arc<dyn Transmitter>) -> Result<(), ModelError> {
        Ok(())
    }
}

fn main() {
    let road = Arc::new(Road::default());
    let radio = Arc::new(Radio::default());

    let mut registry = ModelRegistry::new();
    registry.add_model(Arc::clone(&road)).unwrap();
    registry.add_model(Arc::clone(&radio)).unwrap();
    registry.configure().unwrap();

    let ambulance = Arc::new(Ambulance { serial: 7 });
    assert_eq!(ambulance.entity_id(), Some(7));
    assert!(registry.register(&ambulance).unwrap());
    assert_eq!(road.0.load(Ordering::Relaxed), 7);
    assert_eq!(radio.0.load(Ordering::Relaxed), 1);
}
