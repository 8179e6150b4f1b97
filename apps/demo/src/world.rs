//! Entities of the demo scene and the capability traits models consume.

use crate::config::ScenarioConfig;
use simkit_core::Entity;
use std::fmt::Debug;
use std::sync::Arc;

const AMBULANCE_RANGE: f64 = 50.0;
const BEACON_RANGE: f64 = 25.0;
const BEACON_RADIUS: f64 = 0.5;
pub const OBSTACLE_ID_BASE: u32 = 1000;
pub const BIRD_ID_BASE: u32 = 2000;

pub trait Identified {
    fn id(&self) -> u32;
}

pub trait Vehicle: Identified + Debug + Send + Sync {
    /// Meters per second.
    fn speed(&self) -> f64;
}

pub trait Obstacle: Identified + Debug + Send + Sync {
    fn radius(&self) -> f64;
}

pub trait Transmitter: Identified + Debug + Send + Sync {
    fn range(&self) -> f64;
}

#[derive(Debug, Entity)]
#[entity(capabilities(dyn Vehicle), id = id)]
pub struct Car {
    pub id: u32,
    pub speed: f64,
}

#[derive(Debug, Entity)]
#[entity(capabilities(dyn Vehicle, dyn Transmitter), id = id)]
pub struct Ambulance {
    pub id: u32,
    pub speed: f64,
    pub range: f64,
}

#[derive(Debug, Entity)]
#[entity(capabilities(dyn Obstacle), id = id)]
pub struct Rock {
    pub id: u32,
    pub radius: f64,
}

/// Roadside radio mast: blocks the shoulder and relays messages.
#[derive(Debug, Entity)]
#[entity(capabilities(dyn Obstacle, dyn Transmitter), id = id)]
pub struct Beacon {
    pub id: u32,
    pub radius: f64,
    pub range: f64,
}

/// Flies over everything; no model cares.
#[derive(Debug, Entity)]
#[entity(id = id)]
pub struct Bird {
    pub id: u32,
}

macro_rules! identified {
    ($($ty:ty),+) => {
        $(impl Identified for $ty {
            fn id(&self) -> u32 {
                self.id
            }
        })+
    };
}

identified!(Car, Ambulance, Rock, Beacon, Bird);

impl Vehicle for Car {
    fn speed(&self) -> f64 {
        self.speed
    }
}

impl Vehicle for Ambulance {
    fn speed(&self) -> f64 {
        self.speed
    }
}

impl Transmitter for Ambulance {
    fn range(&self) -> f64 {
        self.range
    }
}

impl Obstacle for Rock {
    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Obstacle for Beacon {
    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Transmitter for Beacon {
    fn range(&self) -> f64 {
        self.range
    }
}

/// Deterministic scene: vehicles, then obstacles, then birds.
///
/// Every fourth vehicle is an [`Ambulance`], every third obstacle a [`Beacon`].
#[must_use]
pub fn populate(scenario: &ScenarioConfig) -> Vec<Arc<dyn Entity>> {
    let mut population: Vec<Arc<dyn Entity>> =
        Vec::with_capacity(scenario.vehicles + scenario.obstacles + scenario.birds);

    for (i, id) in (0..scenario.vehicles).zip(0_u32..) {
        let speed = 2.5f64.mul_add(f64::from(id % 5), 10.0);
        if i % 4 == 3 {
            population.push(Arc::new(Ambulance { id, speed, range: AMBULANCE_RANGE }));
        } else {
            population.push(Arc::new(Car { id, speed }));
        }
    }

    for (j, id) in (0..scenario.obstacles).zip(OBSTACLE_ID_BASE..) {
        if j % 3 == 2 {
            population.push(Arc::new(Beacon { id, radius: BEACON_RADIUS, range: BEACON_RANGE }));
        } else {
            let radius = 0.5f64.mul_add(f64::from((id - OBSTACLE_ID_BASE) % 4), 1.0);
            population.push(Arc::new(Rock { id, radius }));
        }
    }

    population.extend(
        (0..scenario.birds)
            .zip(BIRD_ID_BASE..)
            .map(|(_, id)| Arc::new(Bird { id }) as Arc<dyn Entity>),
    );

    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    #[test]
    fn population_follows_the_scenario_counts() {
        let scenario = ScenarioConfig { vehicles: 8, obstacles: 6, birds: 2, ..ScenarioConfig::default() };
        let population = populate(&scenario);
        assert_eq!(population.len(), 16);

        let ambulances =
            population.iter().filter(|e| e.entity_type() == TypeId::of::<Ambulance>()).count();
        let beacons = population.iter().filter(|e| e.entity_type() == TypeId::of::<Beacon>()).count();
        let birds = population.iter().filter(|e| e.entity_type() == TypeId::of::<Bird>()).count();

        assert_eq!((ambulances, beacons, birds), (2, 2, 2));
    }

    #[test]
    fn empty_scenario_is_empty() {
        let scenario = ScenarioConfig { vehicles: 0, obstacles: 0, birds: 0, ..ScenarioConfig::default() };
        assert!(populate(&scenario).is_empty());
    }
}
