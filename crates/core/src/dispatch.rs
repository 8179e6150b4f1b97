use crate::capability::Capabilities;
use crate::entity::Entity;
use crate::error::RegistryError;
use crate::index::TypeIndex;
use crate::model::ModelEntry;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Which model entry point a dispatch invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    Unregister,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => f.write_str("register"),
            Self::Unregister => f.write_str("unregister"),
        }
    }
}

/// Read-only fan-out over a configured registry's index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dispatcher<'a> {
    index: &'a TypeIndex,
    models: &'a [ModelEntry],
}

impl<'a> Dispatcher<'a> {
    pub(crate) const fn new(index: &'a TypeIndex, models: &'a [ModelEntry]) -> Self {
        Self { index, models }
    }

    /// Delivers `entity` to every model whose capability it satisfies.
    ///
    /// Capability keys are visited in index order, models in insertion order. Returns the
    /// number of models invoked; the first model error aborts the fan-out.
    pub(crate) fn dispatch<E: Entity + ?Sized>(
        &self,
        operation: Operation,
        entity: &Arc<E>,
    ) -> Result<usize, RegistryError> {
        let capabilities = Capabilities::of(entity);
        let mut delivered = 0;

        for capability in self.index.keys() {
            let Some(view) = capabilities.view(capability) else { continue };

            for &position in self.index.lookup(capability) {
                let model = self.models.get(position).ok_or_else(|| RegistryError::Internal {
                    message: format!("index points past model {position}").into(),
                    context: Some(capability.name().into()),
                })?;

                trace!(
                    %operation,
                    model = model.name(),
                    entity = entity.entity_name(),
                    id = ?entity.entity_id(),
                    capability = capability.name(),
                    "Delivering entity"
                );

                match model.deliver(operation, view) {
                    Some(Ok(())) => delivered += 1,
                    Some(Err(source)) => {
                        return Err(RegistryError::ModelFailure {
                            model: model.name().to_owned().into(),
                            entity: entity.entity_name(),
                            entity_id: entity.entity_id(),
                            operation,
                            source,
                            context: None,
                        });
                    },
                    None => {
                        return Err(RegistryError::Internal {
                            message: format!(
                                "view for `{capability}` does not match model `{}`",
                                model.name()
                            )
                            .into(),
                            context: Some(entity.entity_name().into()),
                        });
                    },
                }
            }
        }

        Ok(delivered)
    }
}
