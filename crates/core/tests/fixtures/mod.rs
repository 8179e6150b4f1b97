#![allow(dead_code)]

use parking_lot::Mutex;
use simkit_core::prelude::*;
use std::borrow::Cow;
use std::sync::Arc;

/// Shared, ordered log of every model call, e.g. `"road:register:7"`.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::default()
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().clone()
}

pub trait Vehicle: Send + Sync {
    fn id(&self) -> u32;
}

pub trait Obstacle: Send + Sync {
    fn id(&self) -> u32;
}

#[derive(Debug, Entity)]
#[entity(capabilities(dyn Vehicle), id = 0)]
pub struct Car(pub u32);

impl Vehicle for Car {
    fn id(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Entity)]
#[entity(capabilities(dyn Obstacle), id = 0)]
pub struct Rock(pub u32);

impl Obstacle for Rock {
    fn id(&self) -> u32 {
        self.0
    }
}

/// A broken-down vehicle blocking the road: both a vehicle and an obstacle.
#[derive(Debug, Entity)]
#[entity(capabilities(dyn Vehicle, dyn Obstacle), id = 0)]
pub struct Wreck(pub u32);

impl Vehicle for Wreck {
    fn id(&self) -> u32 {
        self.0
    }
}

impl Obstacle for Wreck {
    fn id(&self) -> u32 {
        self.0
    }
}

/// Interesting to nobody.
#[derive(Debug, Entity)]
pub struct Cloud;

macro_rules! recording_model {
    ($name:ident, $target:ty) => {
        #[derive(Debug)]
        pub struct $name {
            label: &'static str,
            journal: Journal,
            fail_on: Option<u32>,
        }

        impl $name {
            pub fn new(label: &'static str, journal: &Journal) -> Arc<Self> {
                Arc::new(Self { label, journal: Arc::clone(journal), fail_on: None })
            }

            pub fn failing_on(label: &'static str, journal: &Journal, id: u32) -> Arc<Self> {
                Arc::new(Self { label, journal: Arc::clone(journal), fail_on: Some(id) })
            }

            fn record(&self, operation: &str, id: u32) -> Result<(), ModelError> {
                if self.fail_on == Some(id) {
                    return Err(ModelError::rejected(format!("{} refuses {id}", self.label)));
                }
                self.journal.lock().push(format!("{}:{operation}:{id}", self.label));
                Ok(())
            }
        }

        impl Model for $name {
            type Target = $target;

            fn name(&self) -> Cow<'static, str> {
                Cow::Borrowed(self.label)
            }

            fn register(&self, entity: Arc<$target>) -> Result<(), ModelError> {
                self.record("register", entity.id())
            }

            fn unregister(&self, entity: Arc<$target>) -> Result<(), ModelError> {
                self.record("unregister", entity.id())
            }
        }
    };
}

recording_model!(VehicleModel, dyn Vehicle);
recording_model!(ObstacleModel, dyn Obstacle);
recording_model!(CarModel, Car);

/// A model nobody adds; it is still a model when routed.
#[derive(Debug, Default)]
pub struct StrayModel;

impl Model for StrayModel {
    type Target = dyn Vehicle;

    fn register(&self, _entity: Arc<dyn Vehicle>) -> Result<(), ModelError> {
        Ok(())
    }

    fn unregister(&self, _entity: Arc<dyn Vehicle>) -> Result<(), ModelError> {
        Ok(())
    }
}

/// Registry with the given models added and `configure()` already called.
pub fn configured<I>(build: I) -> ModelRegistry
where
    I: FnOnce(&mut ModelRegistry),
{
    let mut registry = ModelRegistry::new();
    build(&mut registry);
    registry.configure().expect("first configure succeeds");
    registry
}
