//! Handler for `GET /contacts/birthdays`.

use std::sync::Arc;

use addrbook_core::{
  Contact, ContactStore,
  birthday::{self, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS},
};
use axum::{
  Json,
  extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct BirthdayParams {
  /// Look-ahead window in days, today included. Defaults to 7.
  pub days: Option<u32>,
}

/// `GET /contacts/birthdays[?days=N]` — contacts whose next birthday falls
/// within the window, soonest first.
pub async fn upcoming<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<BirthdayParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let days = params.days.unwrap_or(DEFAULT_WINDOW_DAYS);
  if days > MAX_WINDOW_DAYS {
    return Err(ApiError::Unprocessable(format!(
      "days must be at most {MAX_WINDOW_DAYS}"
    )));
  }

  let contacts = store.list_all().await.map_err(ApiError::from_store)?;
  let today = Utc::now().date_naive();
  Ok(Json(birthday::upcoming(contacts, today, days)))
}
