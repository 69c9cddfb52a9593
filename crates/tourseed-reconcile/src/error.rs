//! Error type for `tourseed-reconcile`.

use thiserror::Error;

use crate::resolve::EntityKind;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// A get-or-create found nothing and the create step failed.
  #[error("could not create {kind} {name:?}: {source}")]
  Create {
    kind:   EntityKind,
    name:   String,
    #[source]
    source: BoxError,
  },

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
