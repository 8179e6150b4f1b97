//! # Model Registry
//!
//! Binds dynamically created simulation entities to the pluggable models ("subsystems")
//! able to process them.
//!
//! ## Lifecycle
//!
//! * **Building**: models are added with [`ModelRegistry::add_model`]. Each model declares
//!   one capability type through [`Model::Target`].
//! * **Operational**: after [`ModelRegistry::configure`] the model set is frozen and
//!   entities are routed with [`ModelRegistry::register`] / [`ModelRegistry::unregister`].
//!
//! ## Dispatch
//!
//! An [`Entity`] exposes typed capability views (`Arc<dyn Vehicle>`, `Arc<Self>`, ...).
//! The registry walks its capability types in insertion order and hands the matching view to
//! every model declared for it, in the order the models were added. One entity can reach
//! models of several capabilities (fan-out); the first model error aborts the fan-out.
//!
//! ## Example
//!
//! ```rust
//! use parking_lot::Mutex;
//! use simkit_core::prelude::*;
//! use std::sync::Arc;
//!
//! trait Obstacle: Send + Sync {
//!     fn radius(&self) -> f64;
//! }
//!
//! #[derive(Debug, Entity)]
//! #[entity(capabilities(dyn Obstacle))]
//! struct Rock;
//!
//! impl Obstacle for Rock {
//!     fn radius(&self) -> f64 { 1.5 }
//! }
//!
//! #[derive(Debug, Default)]
//! struct CollisionModel { area: Mutex<f64> }
//!
//! impl Model for CollisionModel {
//!     type Target = dyn Obstacle;
//!
//!     fn register(&self, obstacle: Arc<dyn Obstacle>) -> Result<(), ModelError> {
//!         *self.area.lock() += obstacle.radius();
//!         Ok(())
//!     }
//!
//!     fn unregister(&self, obstacle: Arc<dyn Obstacle>) -> Result<(), ModelError> {
//!         *self.area.lock() -= obstacle.radius();
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), RegistryError> {
//! let mut registry = ModelRegistry::new();
//! registry.add_model(Arc::new(CollisionModel::default()))?;
//! registry.configure()?;
//!
//! assert!(registry.register(&Arc::new(Rock))?);
//! # Ok(())
//! # }
//! ```

// Lets `#[derive(Entity)]` expand to `::simkit_core::...` inside this crate too.
#[allow(unused_extern_crates)]
extern crate self as simkit_core;

mod capability;
pub mod config;
mod dispatch;
mod entity;
mod error;
mod index;
mod model;
mod phase;
mod registry;

pub use crate::capability::{Capabilities, CapabilityId};
pub use crate::config::RegistryConfig;
pub use crate::dispatch::Operation;
pub use crate::entity::Entity;
pub use crate::error::{RegistryError, RegistryErrorExt};
pub use crate::model::{Model, ModelEntry, ModelError, ModelErrorExt};
pub use crate::phase::Phase;
pub use crate::registry::ModelRegistry;
pub use simkit_derive::Entity;

pub mod prelude {
    pub use crate::{
        Capabilities, CapabilityId, Entity, Model, ModelEntry, ModelError, ModelRegistry, Operation,
        Phase, RegistryConfig, RegistryError,
    };
}
