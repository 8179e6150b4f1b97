use crate::error::RegistryError;
use std::fmt;

/// Lifecycle of a registry: models are composed while `Building`, entities are routed
/// once `Operational`. The transition happens exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Building,
    Operational,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => f.write_str("building"),
            Self::Operational => f.write_str("operational"),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct PhaseGate {
    phase: Phase,
}

impl PhaseGate {
    pub(crate) const fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) const fn is_operational(&self) -> bool {
        matches!(self.phase, Phase::Operational)
    }

    /// Building -> Operational. A second call is a caller bug, not a no-op.
    pub(crate) fn transition(&mut self) -> Result<(), RegistryError> {
        if self.is_operational() {
            return Err(RegistryError::lifecycle_violation(
                "configure() called on a registry that is already operational",
            ));
        }
        self.phase = Phase::Operational;
        Ok(())
    }

    pub(crate) fn ensure_building(&self, operation: &'static str) -> Result<(), RegistryError> {
        if self.is_operational() {
            return Err(RegistryError::lifecycle_violation(format!(
                "{operation}() is not allowed after configure()"
            )));
        }
        Ok(())
    }

    pub(crate) fn ensure_operational(&self, operation: &'static str) -> Result<(), RegistryError> {
        if !self.is_operational() {
            return Err(RegistryError::lifecycle_violation(format!(
                "{operation}() requires configure() to be called first"
            )));
        }
        Ok(())
    }
}
