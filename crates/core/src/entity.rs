use crate::capability::Capabilities;
use crate::model::Model;
use std::any::{TypeId, type_name};
use std::sync::Arc;

/// A simulation object routed through the [`ModelRegistry`](crate::ModelRegistry).
///
/// An entity does not pick its models. It exposes the capability views it satisfies and the
/// registry delivers it to every model declared for one of them. Implementations should
/// always expose their own concrete type; `#[derive(Entity)]` does so automatically.
///
/// Every [`Model`] is an `Entity` through a blanket impl that reports
/// [`is_model`](Self::is_model), so routing a model is refused at runtime and a type cannot
/// be given its own `Entity` impl once it implements `Model` (`E0119`).
///
/// ```rust
/// use simkit_core::{Capabilities, Entity};
/// use std::sync::Arc;
///
/// trait Obstacle: Send + Sync { fn radius(&self) -> f64; }
///
/// #[derive(Debug)]
/// struct Rock { radius: f64 }
///
/// impl Obstacle for Rock {
///     fn radius(&self) -> f64 { self.radius }
/// }
///
/// impl Entity for Rock {
///     fn expose(self: Arc<Self>, capabilities: &mut Capabilities) {
///         capabilities.provide::<dyn Obstacle>(self.clone()).provide::<Self>(self);
///     }
/// }
/// ```
pub trait Entity: Send + Sync + 'static {
    /// Offers every capability view this entity satisfies.
    fn expose(self: Arc<Self>, capabilities: &mut Capabilities);

    /// Concrete type of the entity, also through `dyn Entity`.
    fn entity_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn entity_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Instance id carried into dispatch errors and logs. `#[entity(id = field)]` sets it.
    fn entity_id(&self) -> Option<u64> {
        None
    }

    /// `true` only for [`Model`] types.
    fn is_model(&self) -> bool {
        false
    }
}

impl<M: Model> Entity for M {
    fn expose(self: Arc<Self>, capabilities: &mut Capabilities) {
        capabilities.provide::<Self>(self);
    }

    fn is_model(&self) -> bool {
        true
    }
}

impl Capabilities {
    /// Collects the views exposed by `entity`.
    #[must_use]
    pub fn of<E: Entity + ?Sized>(entity: &Arc<E>) -> Self {
        let mut capabilities = Self::default();
        Arc::clone(entity).expose(&mut capabilities);
        capabilities
    }
}
