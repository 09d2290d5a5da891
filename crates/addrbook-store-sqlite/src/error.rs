//! Error type for `addrbook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain outcome (not found, conflict); kept as the `source` so callers
  /// can recover it with [`addrbook_core::Error::find_in`].
  #[error("core error: {0}")]
  Core(#[from] addrbook_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
