//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//! 1. `T::default()`
//! 2. the YAML file passed with `--config`, if any
//! 3. environment variables `<PREFIX>__<KEY>`, nested keys separated by `__`
//!
//! Command line overrides are applied by the caller on the returned value.

use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load `T` from defaults, an optional YAML file and the environment.
///
/// `env_prefix` is given without the trailing separator, e.g. `"CUSTOMERS"`.
///
/// # Errors
/// Fails when the explicit config file is missing or any layer does not
/// deserialize into `T`.
pub fn load_config<T>(path: Option<&Path>, env_prefix: &str) -> anyhow::Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    if let Some(path) = path {
        if !path.is_file() {
            bail!("config file '{}' does not exist", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment = figment.merge(Env::prefixed(&format!("{env_prefix}__")).split("__"));

    let config = figment
        .extract::<T>()
        .with_context(|| format!("invalid {} configuration", env_prefix.to_lowercase()))?;

    tracing::debug!(prefix = env_prefix, file = ?path, "configuration loaded");
    Ok(config)
}

/// Pretty JSON rendering used by `--print-config`.
///
/// # Errors
/// Fails only if `T` cannot be represented as JSON.
pub fn render_config<T: Serialize>(config: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(config).context("failed to render configuration")
}
