//! # Registry Errors
//!
//! Every failure of the registry is returned to the caller; nothing is logged and
//! swallowed.

use crate::dispatch::Operation;
use crate::model::ModelError;
use std::borrow::Cow;

/// Errors raised by [`ModelRegistry`](crate::ModelRegistry) operations.
#[simkit_derive::simkit_error]
pub enum RegistryError {
    /// An operation was invoked in the wrong phase: adding a model after `configure()`,
    /// configuring twice, or routing before `configure()`.
    #[error("Lifecycle violation{}: {message}", format_context(.context))]
    LifecycleViolation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A model was passed where a plain entity was expected.
    #[error("Invalid argument{}: {message}", format_context(.context))]
    InvalidArgument { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A model failed while processing an entity. Dispatch for that entity stopped here;
    /// models notified before this one are not rolled back.
    #[error(
        "Model `{model}` failed to {operation} `{entity}`{}{}: {source}",
        format_entity_id(.entity_id),
        format_context(.context)
    )]
    ModelFailure {
        model: Cow<'static, str>,
        entity: &'static str,
        /// See [`Entity::entity_id`](crate::Entity::entity_id).
        entity_id: Option<u64>,
        operation: Operation,
        #[source]
        source: ModelError,
        context: Option<Cow<'static, str>>,
    },

    /// Broken registry invariant.
    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RegistryError {
    /// The failing model's name, for [`RegistryError::ModelFailure`].
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::ModelFailure { model, .. } => Some(model),
            _ => None,
        }
    }

    /// The failing entity's id, for [`RegistryError::ModelFailure`] on entities that carry one.
    #[must_use]
    pub const fn entity_id(&self) -> Option<u64> {
        match self {
            Self::ModelFailure { entity_id, .. } => *entity_id,
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn format_entity_id(id: &Option<u64>) -> Cow<'static, str> {
    id.map_or(Cow::Borrowed(""), |id| Cow::Owned(format!(" #{id}")))
}
