//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts/` | Every contact |
//! | `POST`   | `/contacts/` | Body: [`ContactBody`]; 409 if the email is taken |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `PUT`    | `/contacts/:id` | Body: [`ContactBody`]; overwrites every field |
//! | `DELETE` | `/contacts/:id` | Returns the removed contact |

use std::sync::Arc;

use addrbook_core::{Contact, ContactStore, NewContact};
use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiError;

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /contacts/` and `PUT /contacts/:id`.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone:           String,
  pub birthday:        NaiveDate,
  #[serde(default)]
  pub additional_data: Option<String>,
}

impl From<ContactBody> for NewContact {
  fn from(b: ContactBody) -> Self {
    NewContact {
      first_name:      b.first_name,
      last_name:       b.last_name,
      email:           b.email,
      phone:           b.phone,
      birthday:        b.birthday,
      additional_data: b.additional_data,
    }
  }
}

/// Turn an extracted body into a validated [`NewContact`].
fn validated(body: Result<Json<ContactBody>, JsonRejection>) -> Result<NewContact, ApiError> {
  let Json(body) = body.map_err(|rej| ApiError::Unprocessable(rej.body_text()))?;
  let input = NewContact::from(body);
  input.validate()?;
  Ok(input)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts/`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store.list_all().await.map_err(ApiError::from_store)?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let contact = store
    .find_by_id(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts/` — 200 + the stored contact.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let input = validated(body)?;
  let email = input.email.clone();

  let contact = store.create(input).await.map_err(|e| {
    let err = ApiError::from_store(e);
    if matches!(err, ApiError::Conflict) {
      tracing::info!(%email, "rejected contact with duplicate email");
    }
    err
  })?;
  Ok(Json(contact))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id` — every field is overwritten; the email is not checked
/// against other contacts.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let input = validated(body)?;
  let contact = store.update(id, input).await.map_err(ApiError::from_store)?;
  Ok(Json(contact))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id` — returns the removed contact.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let contact = store.delete(id).await.map_err(ApiError::from_store)?;
  Ok(Json(contact))
}
