//! Registry configuration and the layered config loader.

use serde::Deserialize;
#[cfg(feature = "config")]
use serde::de::DeserializeOwned;
#[cfg(feature = "config")]
use std::borrow::Cow;
#[cfg(feature = "config")]
use std::path::{Path, PathBuf};
#[cfg(feature = "config")]
use tracing::info;

const DEFAULT_NAME: &str = "models";
const DEFAULT_CAPACITY: usize = 8;
/// Upper bound for the pre-allocation hint; registries hold a handful of models.
const MAX_CAPACITY: usize = 1024;

/// Tuning knobs of a [`ModelRegistry`](crate::ModelRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Label attached to the registry's log events.
    pub name: String,
    /// Report entities no model accepted at `warn` instead of `debug` level.
    pub warn_unmatched: bool,
    /// Expected number of models (pre-allocation hint).
    pub capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { name: DEFAULT_NAME.to_owned(), warn_unmatched: false, capacity: DEFAULT_CAPACITY }
    }
}

impl RegistryConfig {
    #[must_use = "Customize the registry label"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() { DEFAULT_NAME.to_owned() } else { name };
        self
    }

    #[must_use = "Customize how unmatched entities are reported"]
    pub const fn with_warn_unmatched(mut self, enabled: bool) -> Self {
        self.warn_unmatched = enabled;
        self
    }

    #[must_use = "Customize the model pre-allocation hint"]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.min(MAX_CAPACITY);
        self
    }

    pub(crate) fn normalized(mut self) -> Self {
        if self.name.trim().is_empty() {
            DEFAULT_NAME.clone_into(&mut self.name);
        }
        self.capacity = self.capacity.min(MAX_CAPACITY);
        self
    }
}

/// Error raised by [`load_config`].
#[cfg(feature = "config")]
#[simkit_derive::simkit_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ::config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file overlaid with `SIMKIT__`-prefixed environment variables.
///
/// 1. **Base File**: `path`, or `simkit` (any supported extension) in the working directory.
/// 2. **Environment Overrides**: nested keys use double underscores, e.g.
///    `SIMKIT__REGISTRY__WARN_UNMATCHED=true` maps to `registry.warn_unmatched`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, a source is malformed, or the
/// merged values do not deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use simkit_core::config::{RegistryConfig, load_config};
///
/// #[derive(Default, serde::Deserialize)]
/// struct DriverConfig {
///     #[serde(default)]
///     registry: RegistryConfig,
/// }
///
/// let cfg: DriverConfig = load_config(Some("config/simkit")).unwrap_or_default();
/// ```
#[cfg(feature = "config")]
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("simkit"), |p| p.as_ref().to_path_buf());

    let builder = ::config::Config::builder()
        .add_source(::config::File::from(effective_path.as_path()).required(true))
        .add_source(
            ::config::Environment::with_prefix("SIMKIT")
                .prefix_separator("__")
                .separator("__")
                .convert_case(::config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = RegistryConfig::default();
        assert_eq!(cfg.name, "models");
        assert!(!cfg.warn_unmatched);
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn builders_clamp_and_fall_back() {
        let cfg = RegistryConfig::default().with_name("  ").with_capacity(usize::MAX);
        assert_eq!(cfg.name, "models");
        assert_eq!(cfg.capacity, MAX_CAPACITY);

        let cfg = RegistryConfig::default().with_name("traffic").with_warn_unmatched(true);
        assert_eq!(cfg.name, "traffic");
        assert!(cfg.warn_unmatched);
    }

    #[test]
    fn normalized_repairs_deserialized_values() {
        let cfg = RegistryConfig { name: String::new(), warn_unmatched: true, capacity: 1 << 20 };
        let cfg = cfg.normalized();
        assert_eq!(cfg.name, "models");
        assert_eq!(cfg.capacity, MAX_CAPACITY);
        assert!(cfg.warn_unmatched);
    }
}
