//! Layered configuration: optional TOML file, then `TOURSEED_*` environment
//! variables. Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use tourseed_reconcile::audit::DEFAULT_FEW_ITEMS_THRESHOLD;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database holding the tours. Required by every command.
  #[serde(default)]
  pub database_path:       Option<PathBuf>,
  /// Catalog document (`.json` or `.toml`). Required by `reconcile`.
  #[serde(default)]
  pub catalog_path:        Option<PathBuf>,
  #[serde(default = "default_few_items_threshold")]
  pub few_items_threshold: usize,
}

fn default_few_items_threshold() -> usize { DEFAULT_FEW_ITEMS_THRESHOLD }

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TOURSEED"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// The database to open: `flag` if given, else `database_path`. Having
  /// neither is fatal.
  pub fn database_path(&self, flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    flag
      .or_else(|| self.database_path.clone())
      .map(|p| expand_tilde(&p))
      .context("no database configured: set database_path or TOURSEED_DATABASE_PATH")
  }

  /// The catalog to load: `flag` if given, else `catalog_path`.
  pub fn catalog_path(&self, flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    flag
      .or_else(|| self.catalog_path.clone())
      .map(|p| expand_tilde(&p))
      .context("no catalog configured: pass --catalog or set catalog_path")
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn settings(database: Option<&str>, catalog: Option<&str>) -> Settings {
    Settings {
      database_path:       database.map(PathBuf::from),
      catalog_path:        catalog.map(PathBuf::from),
      few_items_threshold: DEFAULT_FEW_ITEMS_THRESHOLD,
    }
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(settings.few_items_threshold, DEFAULT_FEW_ITEMS_THRESHOLD);
  }

  #[test]
  fn relative_paths_are_left_alone() {
    assert_eq!(expand_tilde(Path::new("tours.db")), PathBuf::from("tours.db"));
    assert_eq!(expand_tilde(Path::new("/var/tours.db")), PathBuf::from("/var/tours.db"));
  }

  #[test]
  fn missing_database_is_an_error() {
    let err = settings(None, Some("catalog.json")).database_path(None).unwrap_err();
    assert!(err.to_string().contains("no database configured"));
  }

  #[test]
  fn database_flag_overrides_settings() {
    let s = settings(Some("configured.db"), None);
    assert_eq!(s.database_path(None).unwrap(), PathBuf::from("configured.db"));
    assert_eq!(
      s.database_path(Some(PathBuf::from("flag.db"))).unwrap(),
      PathBuf::from("flag.db")
    );
  }

  #[test]
  fn database_path_expands_tilde() {
    let path = settings(Some("~/tours.db"), None).database_path(None).unwrap();
    match std::env::var("HOME") {
      Ok(home) => assert_eq!(path, PathBuf::from(home).join("tours.db")),
      Err(_) => assert_eq!(path, PathBuf::from("~/tours.db")),
    }
  }

  #[test]
  fn catalog_path_falls_back_and_overrides() {
    assert!(settings(Some("tours.db"), None).catalog_path(None).is_err());

    let s = settings(None, Some("catalog.toml"));
    assert_eq!(s.catalog_path(None).unwrap(), PathBuf::from("catalog.toml"));
    assert_eq!(
      s.catalog_path(Some(PathBuf::from("other.json"))).unwrap(),
      PathBuf::from("other.json")
    );
  }
}
