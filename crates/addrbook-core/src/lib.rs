//! Core types and trait definitions for the addrbook contact service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod birthday;
pub mod contact;
pub mod error;
pub mod store;

pub use contact::{Contact, NewContact};
pub use error::{Error, Result};
pub use store::ContactStore;
