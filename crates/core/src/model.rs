//! Models: the pluggable subsystems entities are dispatched to.

use crate::capability::CapabilityId;
use crate::dispatch::Operation;
use std::any::{Any, TypeId, type_name};
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// Errors a model reports from its `register`/`unregister` entry points.
#[simkit_derive::simkit_error]
pub enum ModelError {
    /// The model refused the entity.
    #[error("Entity rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Any other failure raised inside the model.
    #[error("Model error{}: {source}", format_context(.context))]
    Other { source: Box<dyn std::error::Error + Send + Sync>, context: Option<Cow<'static, str>> },

    #[error("Internal model error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A subsystem that processes every entity satisfying its capability type.
///
/// `Target` is the most general type the model accepts, usually a trait object:
///
/// ```rust
/// use parking_lot::Mutex;
/// use simkit_core::{Model, ModelError};
/// use std::sync::Arc;
///
/// trait Vehicle: Send + Sync { fn speed(&self) -> f64; }
///
/// #[derive(Debug, Default)]
/// struct RoadModel { moving: Mutex<usize> }
///
/// impl Model for RoadModel {
///     type Target = dyn Vehicle;
///
///     fn register(&self, _vehicle: Arc<dyn Vehicle>) -> Result<(), ModelError> {
///         *self.moving.lock() += 1;
///         Ok(())
///     }
///
///     fn unregister(&self, _vehicle: Arc<dyn Vehicle>) -> Result<(), ModelError> {
///         let mut moving = self.moving.lock();
///         *moving = moving.saturating_sub(1);
///         Ok(())
///     }
/// }
/// ```
///
/// Entry points take `&self`: once the registry is operational it may be shared across
/// threads, and models own whatever synchronization their state needs. `unregister` may be
/// called for entities the model never saw and should treat that as a no-op.
pub trait Model: Debug + Send + Sync + 'static {
    type Target: ?Sized + 'static;

    /// Label used in logs and dispatch errors.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(type_name::<Self>())
    }

    /// Called for every routed entity that satisfies `Target`.
    ///
    /// # Errors
    /// Any error aborts the current dispatch and is surfaced to the caller.
    fn register(&self, entity: Arc<Self::Target>) -> Result<(), ModelError>;

    /// Called for every unrouted entity that satisfies `Target`.
    ///
    /// # Errors
    /// Any error aborts the current dispatch and is surfaced to the caller.
    fn unregister(&self, entity: Arc<Self::Target>) -> Result<(), ModelError>;
}

/// Object-safe face of [`Model`] used by the registry.
pub(crate) trait ErasedModel: Debug + Send + Sync {
    /// `None` when `view` is not an `Arc<Target>`.
    fn deliver(&self, operation: Operation, view: &dyn Any) -> Option<Result<(), ModelError>>;
}

impl<M: Model> ErasedModel for M {
    fn deliver(&self, operation: Operation, view: &dyn Any) -> Option<Result<(), ModelError>> {
        let target = view.downcast_ref::<Arc<M::Target>>()?;
        let target = Arc::clone(target);
        Some(match operation {
            Operation::Register => self.register(target),
            Operation::Unregister => self.unregister(target),
        })
    }
}

/// A model owned by the registry, with its declared capability.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    name: Cow<'static, str>,
    capability: CapabilityId,
    model_type: TypeId,
    erased: Arc<dyn ErasedModel>,
    instance: Arc<dyn Any + Send + Sync>,
}

impl ModelEntry {
    pub(crate) fn new<M: Model>(model: Arc<M>) -> Self {
        Self {
            name: model.name(),
            capability: CapabilityId::of::<M::Target>(),
            model_type: TypeId::of::<M>(),
            erased: Arc::clone(&model) as Arc<dyn ErasedModel>,
            instance: model,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn capability(&self) -> CapabilityId {
        self.capability
    }

    #[must_use]
    pub const fn model_type(&self) -> TypeId {
        self.model_type
    }

    #[must_use]
    pub fn is<M: Model>(&self) -> bool {
        self.model_type == TypeId::of::<M>()
    }

    /// Returns the model as its concrete type.
    #[must_use]
    pub fn downcast<M: Model>(&self) -> Option<Arc<M>> {
        Arc::clone(&self.instance).downcast::<M>().ok()
    }

    /// Identity check: same allocation, regardless of structural equality.
    pub(crate) fn is_instance<M: Model>(&self, model: &Arc<M>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.instance), Arc::as_ptr(model))
    }

    pub(crate) fn deliver(
        &self,
        operation: Operation,
        view: &dyn Any,
    ) -> Option<Result<(), ModelError>> {
        self.erased.deliver(operation, view)
    }
}
