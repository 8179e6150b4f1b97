//! Capability identities and the per-dispatch view set an entity exposes.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a capability type (a trait object such as `dyn Vehicle`, or a concrete type).
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct CapabilityId {
    id: TypeId,
    name: &'static str,
}

impl CapabilityId {
    #[must_use]
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<C>(), name: type_name::<C>() }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityId({})", self.name)
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The typed views one entity offers to the registry during a single dispatch.
///
/// Each view is stored as an `Arc<C>` keyed by `CapabilityId::of::<C>()`, so a model
/// declaring `Target = C` receives exactly the `Arc<C>` the entity provided.
#[derive(Default)]
pub struct Capabilities {
    views: Vec<(CapabilityId, Box<dyn Any>)>,
}

impl Capabilities {
    /// Offers `view` as capability `C`. The first view provided for a capability wins.
    ///
    /// ```rust
    /// use simkit_core::{Capabilities, CapabilityId};
    /// use std::sync::Arc;
    ///
    /// trait Vehicle { fn speed(&self) -> f64; }
    /// struct Truck;
    /// impl Vehicle for Truck { fn speed(&self) -> f64 { 80.0 } }
    ///
    /// let truck = Arc::new(Truck);
    /// let mut capabilities = Capabilities::default();
    /// capabilities.provide::<dyn Vehicle>(truck.clone()).provide::<Truck>(truck);
    ///
    /// assert!(capabilities.satisfies(CapabilityId::of::<dyn Vehicle>()));
    /// assert_eq!(capabilities.get::<dyn Vehicle>().map(|v| v.speed()), Some(80.0));
    /// ```
    pub fn provide<C: ?Sized + 'static>(&mut self, view: Arc<C>) -> &mut Self {
        let id = CapabilityId::of::<C>();
        if !self.satisfies(id) {
            self.views.push((id, Box::new(view)));
        }
        self
    }

    #[must_use]
    pub fn satisfies(&self, capability: CapabilityId) -> bool {
        self.views.iter().any(|(id, _)| *id == capability)
    }

    /// Returns the view provided for `C`, if any.
    #[must_use]
    pub fn get<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        self.view(CapabilityId::of::<C>())
            .and_then(|view| view.downcast_ref::<Arc<C>>())
            .map(Arc::clone)
    }

    /// Capability types offered, in the order they were provided.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = CapabilityId> + '_ {
        self.views.iter().map(|(id, _)| *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Type-erased `Arc<C>` for `capability`.
    pub(crate) fn view(&self, capability: CapabilityId) -> Option<&dyn Any> {
        self.views.iter().find(|(id, _)| *id == capability).map(|(_, view)| view.as_ref())
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.views.iter().map(|(id, _)| id.name)).finish()
    }
}
