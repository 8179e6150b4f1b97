pub mod fixtures;

use fixtures::{Car, Cloud, ObstacleModel, Rock, VehicleModel, Wreck, entries, journal};
use proptest::prelude::*;
use simkit_core::prelude::*;
use std::sync::Arc;

const LABELS: [&str; 8] = ["m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Vehicle,
    Obstacle,
}

#[derive(Debug, Clone, Copy)]
enum Subject {
    Car,
    Rock,
    Wreck,
    Cloud,
}

impl Subject {
    const fn satisfies(self, kind: Kind) -> bool {
        matches!(
            (self, kind),
            (Self::Car | Self::Wreck, Kind::Vehicle) | (Self::Rock | Self::Wreck, Kind::Obstacle)
        )
    }

    fn entity(self, id: u32) -> Arc<dyn Entity> {
        match self {
            Self::Car => Arc::new(Car(id)),
            Self::Rock => Arc::new(Rock(id)),
            Self::Wreck => Arc::new(Wreck(id)),
            Self::Cloud => Arc::new(Cloud),
        }
    }
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![Just(Kind::Vehicle), Just(Kind::Obstacle)]
}

fn subject() -> impl Strategy<Value = Subject> {
    prop_oneof![Just(Subject::Car), Just(Subject::Rock), Just(Subject::Wreck), Just(Subject::Cloud)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn dispatch_order_is_key_order_then_insertion_order(
        kinds in prop::collection::vec(kind(), 0..LABELS.len()),
        subject in subject(),
        id in 0_u32..1000,
    ) {
        let log = journal();
        let mut registry = ModelRegistry::new();
        for (kind, label) in kinds.iter().zip(LABELS) {
            let added = match kind {
                Kind::Vehicle => registry.add_model(VehicleModel::new(label, &log)),
                Kind::Obstacle => registry.add_model(ObstacleModel::new(label, &log)),
            };
            prop_assert!(added.unwrap());
        }
        registry.configure().unwrap();

        let mut key_order: Vec<Kind> = Vec::new();
        for kind in &kinds {
            if !key_order.contains(kind) {
                key_order.push(*kind);
            }
        }
        let expected: Vec<String> = key_order
            .iter()
            .filter(|kind| subject.satisfies(**kind))
            .flat_map(|key| {
                kinds
                    .iter()
                    .zip(LABELS)
                    .filter(move |(kind, _)| *kind == key)
                    .map(move |(_, label)| format!("{label}:register:{id}"))
            })
            .collect();

        let matched = registry.register(&subject.entity(id)).unwrap();

        prop_assert_eq!(matched, !expected.is_empty());
        prop_assert_eq!(entries(&log), expected);
    }

    #[test]
    fn repeated_additions_keep_one_entry_per_instance(
        picks in prop::collection::vec(0_usize..4, 1..24),
    ) {
        let log = journal();
        let pool: Vec<Arc<VehicleModel>> =
            LABELS[..4].iter().map(|&label| VehicleModel::new(label, &log)).collect();

        let mut registry = ModelRegistry::new();
        let mut seen = Vec::new();
        for pick in picks {
            let fresh = !seen.contains(&pick);
            prop_assert_eq!(registry.add_model(Arc::clone(&pool[pick])).unwrap(), fresh);
            if fresh {
                seen.push(pick);
            }
        }

        prop_assert_eq!(registry.len(), seen.len());
        let names: Vec<&str> = registry.models().iter().map(ModelEntry::name).collect();
        let expected: Vec<&str> = seen.iter().map(|&i| LABELS[i]).collect();
        prop_assert_eq!(names, expected);
    }
}
