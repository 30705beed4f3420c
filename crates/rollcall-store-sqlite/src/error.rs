//! Error type for `rollcall-store-sqlite`.

use rollcall_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// Update or delete addressed an id with no row.
  #[error("materia not found: {0}")]
  NotFound(uuid::Uuid),
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Error::NotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
