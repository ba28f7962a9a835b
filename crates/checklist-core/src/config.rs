use std::fs;
use std::path::Path;

use anyhow::{
  Context,
  anyhow,
  bail
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  Level,
  debug,
  info
};

use crate::persist::StorageKeys;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Widget settings. Every field has a default,
/// so an empty document is a valid config.
///
/// ```toml
/// [storage]
/// list_key = "mindbox-todos"
/// filter_key = "mindbox-filter"
///
/// [log]
/// level = "info"
/// ```
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub storage: StorageKeys,
  pub log:     LogConfig
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct LogConfig {
  pub level: String
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: DEFAULT_LOG_LEVEL.to_string()
    }
  }
}

impl LogConfig {
  /// Most verbose level to record. Accepts
  /// `trace`, `debug`, `info`, `warn` and
  /// `error` in any case.
  pub fn max_level(&self) -> anyhow::Result<Level> {
    self.level.trim().parse::<Level>().map_err(
      |_| {
        anyhow!(
          "log.level `{}` is not one of trace, \
           debug, info, warn, error",
          self.level
        )
      }
    )
  }
}

impl Config {
  /// Reads `path` when given; otherwise
  /// returns the defaults.
  #[tracing::instrument]
  pub fn load(
    path: Option<&Path>
  ) -> anyhow::Result<Self> {
    let Some(path) = path else {
      info!("no config file given; using defaults");
      return Ok(Self::default());
    };

    info!(config = %path.display(), "loading config");
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed reading {}",
          path.display()
        )
      })?;

    Self::from_toml_str(&text).with_context(
      || format!("invalid config {}", path.display())
    )
  }

  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: Config = toml::from_str(text)
      .context("failed parsing config TOML")?;
    cfg.validate()?;
    debug!(?cfg, "parsed config");
    Ok(cfg)
  }

  fn validate(&self) -> anyhow::Result<()> {
    self.log.max_level()?;

    let keys = &self.storage;
    if keys.list_key.trim().is_empty() {
      bail!("storage.list_key must not be empty");
    }
    if keys.filter_key.trim().is_empty() {
      bail!(
        "storage.filter_key must not be empty"
      );
    }
    if keys.list_key == keys.filter_key {
      bail!(
        "storage.list_key and \
         storage.filter_key must differ \
         (both are `{}`)",
        keys.list_key
      );
    }
    Ok(())
  }
}
