//! Error types for `tourseed-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("catalog is not valid JSON: {0}")]
  CatalogJson(#[from] serde_json::Error),

  #[error("catalog is not valid TOML: {0}")]
  CatalogToml(#[from] toml::de::Error),

  #[error("unsupported catalog format: {0:?}")]
  UnsupportedFormat(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
