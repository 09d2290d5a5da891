//! Root and health-check handlers.

use std::sync::Arc;

use addrbook_core::ContactStore;
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::error::ApiError;

/// Version string reported by `GET /`.
pub const APP_VERSION: &str = "Application V0.0.1";

/// `GET /`
pub async fn root() -> Json<Value> { Json(json!({ "message": APP_VERSION })) }

/// `GET /api/healthchecker` — runs `SELECT 1` against the store.
///
/// The cause of a failed probe is logged, never returned.
pub async fn healthchecker<S>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError>
where
  S: ContactStore,
{
  match store.ping().await {
    Ok(Some(_)) => Ok(Json(json!({ "message": "Welcome to addrbook!" }))),
    Ok(None) => {
      tracing::error!("health probe returned no row");
      Err(ApiError::Internal("Database is not configured correctly"))
    }
    Err(e) => {
      tracing::error!(error = %e, "health probe failed");
      Err(ApiError::Internal("Error connecting to the database"))
    }
  }
}
