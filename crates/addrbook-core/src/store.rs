//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `addrbook-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, NewContact};

/// Abstraction over an addrbook contact store backend.
///
/// Domain failures (`NotFound`, `Conflict`) are reported as a backend error
/// whose source chain contains a [`crate::Error`]; see
/// [`crate::Error::find_in`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lookups ───────────────────────────────────────────────────────────

  /// Exact-match lookup by email. No case folding.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Every contact, in id order. No pagination.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new contact and return it with its assigned id.
  ///
  /// Fails with `Conflict` if a contact with the same email exists.
  fn create(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite every mutable field of contact `id`.
  ///
  /// Fails with `NotFound` if `id` is absent. The new email is not checked
  /// against other contacts.
  fn update(
    &self,
    id: i64,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Remove contact `id` and return its last-known values.
  ///
  /// Fails with `NotFound` if `id` is absent, including on a repeated delete.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  // ── Health ────────────────────────────────────────────────────────────

  /// Run a trivial probe query (`SELECT 1`). `None` means the backend
  /// answered but returned no row.
  fn ping(&self) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + '_;
}
