use crate::capability::CapabilityId;
use crate::config::RegistryConfig;
use crate::dispatch::{Dispatcher, Operation};
use crate::entity::Entity;
use crate::error::RegistryError;
use crate::index::TypeIndex;
use crate::model::{Model, ModelEntry};
use crate::phase::{Phase, PhaseGate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Binds simulation entities to the models able to process them.
///
/// A registry is composed while [`Phase::Building`] with [`add_model`](Self::add_model),
/// switched once to [`Phase::Operational`] with [`configure`](Self::configure), and then
/// routes entities with [`register`](Self::register) / [`unregister`](Self::unregister).
/// Routing only needs `&self`, so an operational registry can be shared behind an `Arc`.
///
/// ```rust
/// use parking_lot::Mutex;
/// use simkit_core::prelude::*;
/// use std::sync::Arc;
///
/// trait Vehicle: Send + Sync {}
///
/// #[derive(Debug, Entity)]
/// #[entity(capabilities(dyn Vehicle))]
/// struct Truck;
/// impl Vehicle for Truck {}
///
/// #[derive(Debug, Default)]
/// struct RoadModel { vehicles: Mutex<usize> }
///
/// impl Model for RoadModel {
///     type Target = dyn Vehicle;
///     fn register(&self, _: Arc<dyn Vehicle>) -> Result<(), ModelError> {
///         *self.vehicles.lock() += 1;
///         Ok(())
///     }
///     fn unregister(&self, _: Arc<dyn Vehicle>) -> Result<(), ModelError> {
///         *self.vehicles.lock() -= 1;
///         Ok(())
///     }
/// }
///
/// # fn main() -> Result<(), RegistryError> {
/// let road = Arc::new(RoadModel::default());
/// let mut registry = ModelRegistry::new();
/// assert!(registry.add_model(Arc::clone(&road))?);
/// registry.configure()?;
///
/// assert!(registry.register(&Arc::new(Truck))?);
/// assert_eq!(*road.vehicles.lock(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ModelRegistry {
    config: RegistryConfig,
    gate: PhaseGate,
    models: Vec<ModelEntry>,
    index: TypeIndex,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let config = config.normalized();
        Self {
            models: Vec::with_capacity(config.capacity),
            index: TypeIndex::with_capacity(config.capacity),
            gate: PhaseGate::default(),
            config,
        }
    }

    /// Adds a model under its declared capability.
    ///
    /// Returns `Ok(false)` without touching any state if this very instance (same
    /// allocation) was added before; two equal but distinct instances are both kept.
    ///
    /// # Errors
    /// Returns [`RegistryError::LifecycleViolation`] once the registry is operational.
    pub fn add_model<M: Model>(&mut self, model: Arc<M>) -> Result<bool, RegistryError> {
        self.gate.ensure_building("add_model")?;

        if self.models.iter().any(|entry| entry.is_instance(&model)) {
            debug!(registry = %self.config.name, model = %model.name(), "Model already added");
            return Ok(false);
        }

        let entry = ModelEntry::new(model);
        let capability = entry.capability();
        debug!(
            registry = %self.config.name,
            model = entry.name(),
            capability = capability.name(),
            "Model added"
        );

        self.index.put(capability, self.models.len());
        self.models.push(entry);
        Ok(true)
    }

    /// Ends composition. Afterwards models can no longer be added and entities can be routed.
    ///
    /// # Errors
    /// Returns [`RegistryError::LifecycleViolation`] if called more than once.
    pub fn configure(&mut self) -> Result<(), RegistryError> {
        self.gate.transition()?;
        info!(
            registry = %self.config.name,
            models = self.models.len(),
            capabilities = self.index.len(),
            "Model registry configured"
        );
        Ok(())
    }

    /// Delivers `entity` to every model whose capability it satisfies.
    ///
    /// Returns `Ok(false)` when no model is interested in the entity.
    ///
    /// # Errors
    /// * [`RegistryError::InvalidArgument`] if the entity is a [`Model`], added or not.
    /// * [`RegistryError::LifecycleViolation`] before [`configure`](Self::configure).
    /// * [`RegistryError::ModelFailure`] if a model fails; models notified before it keep
    ///   the entity.
    pub fn register<E: Entity + ?Sized>(&self, entity: &Arc<E>) -> Result<bool, RegistryError> {
        self.route(Operation::Register, entity)
    }

    /// Withdraws `entity` from every model whose capability it satisfies.
    ///
    /// The registry keeps no routing history: unregistering an entity that was never
    /// registered is legal and reaches the same models, which must treat it as a no-op.
    ///
    /// # Errors
    /// Same as [`register`](Self::register).
    pub fn unregister<E: Entity + ?Sized>(&self, entity: &Arc<E>) -> Result<bool, RegistryError> {
        self.route(Operation::Unregister, entity)
    }

    fn route<E: Entity + ?Sized>(
        &self,
        operation: Operation,
        entity: &Arc<E>,
    ) -> Result<bool, RegistryError> {
        if entity.is_model() {
            return Err(RegistryError::InvalidArgument {
                message: format!(
                    "`{}` is a model; models are added with add_model(), not routed",
                    entity.entity_name()
                )
                .into(),
                context: Some(operation.to_string().into()),
            });
        }
        self.gate.ensure_operational(match operation {
            Operation::Register => "register",
            Operation::Unregister => "unregister",
        })?;

        let delivered = Dispatcher::new(&self.index, &self.models).dispatch(operation, entity)?;

        if delivered == 0 {
            let (name, id) = (entity.entity_name(), entity.entity_id());
            if self.config.warn_unmatched {
                warn!(registry = %self.config.name, %operation, entity = name, ?id, "No model accepts entity");
            } else {
                debug!(registry = %self.config.name, %operation, entity = name, ?id, "No model accepts entity");
            }
        }

        Ok(delivered > 0)
    }

    /// All models in insertion order. Legal in every phase.
    #[must_use]
    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Declared capability types, in first-insertion order.
    pub fn capabilities(&self) -> impl ExactSizeIterator<Item = CapabilityId> + '_ {
        self.index.keys()
    }

    /// Models declared for exactly capability `C`, in insertion order.
    pub fn models_for<C: ?Sized + 'static>(&self) -> impl Iterator<Item = &ModelEntry> + '_ {
        self.index.lookup(CapabilityId::of::<C>()).iter().filter_map(|&i| self.models.get(i))
    }

    /// First model of concrete type `M`.
    #[must_use]
    pub fn model<M: Model>(&self) -> Option<Arc<M>> {
        self.models.iter().find(|entry| entry.is::<M>()).and_then(ModelEntry::downcast::<M>)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.gate.phase()
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.gate.is_operational()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
