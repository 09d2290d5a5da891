//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every variant renders as `{"detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found")]
  NotFound,

  #[error("contact already exists")]
  Conflict,

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  /// A failure whose cause must not reach the caller; the message is fixed.
  #[error("internal error: {0}")]
  Internal(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error by the domain outcome in its source chain.
  pub fn from_store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match addrbook_core::Error::find_in(&err) {
      Some(addrbook_core::Error::NotFound(_)) => ApiError::NotFound,
      Some(addrbook_core::Error::Conflict(_)) => ApiError::Conflict,
      Some(addrbook_core::Error::Invalid(m)) => ApiError::Unprocessable(m.clone()),
      None => ApiError::Store(Box::new(err)),
    }
  }
}

impl From<addrbook_core::Error> for ApiError {
  fn from(err: addrbook_core::Error) -> Self { ApiError::from_store(err) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT FOUND".to_owned()),
      ApiError::Conflict => {
        (StatusCode::CONFLICT, "Contact already exists.".to_owned())
      }
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, (*m).to_owned()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal server error".to_owned(),
        )
      }
    };
    (status, Json(json!({ "detail": message }))).into_response()
  }
}
