use crate::capability::CapabilityId;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;

/// Capability type -> positions of the models declared for it.
///
/// Keys keep first-insertion order and each key's positions keep insertion order, which
/// is what makes dispatch traces reproducible. There is no removal.
#[derive(Debug, Default)]
pub(crate) struct TypeIndex {
    slots: IndexMap<CapabilityId, Vec<usize>, FxBuildHasher>,
}

impl TypeIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { slots: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()) }
    }

    pub(crate) fn put(&mut self, capability: CapabilityId, position: usize) {
        self.slots.entry(capability).or_default().push(position);
    }

    pub(crate) fn lookup(&self, capability: CapabilityId) -> &[usize] {
        self.slots.get(&capability).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn keys(&self) -> impl ExactSizeIterator<Item = CapabilityId> + '_ {
        self.slots.keys().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
