//! Error types for `addrbook-core`.

use thiserror::Error;

/// Domain outcomes a store operation can fail with, independent of backend.
///
/// Backends wrap this type as a `#[source]` of their own error so the HTTP
/// layer can find it by walking the error chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("contact not found: {0}")]
  NotFound(i64),

  #[error("a contact with email {0:?} already exists")]
  Conflict(String),

  #[error("invalid contact: {0}")]
  Invalid(String),
}

impl Error {
  /// Find the first `addrbook_core::Error` in `err`'s source chain,
  /// including `err` itself.
  pub fn find_in<'a>(
    err: &'a (dyn std::error::Error + 'static),
  ) -> Option<&'a Error> {
    let mut current = Some(err);
    while let Some(e) = current {
      if let Some(core) = e.downcast_ref::<Error>() {
        return Some(core);
      }
      current = e.source();
    }
    None
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
