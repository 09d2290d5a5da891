//! JSON REST API for addrbook.
//!
//! Exposes an axum [`Router`] backed by any [`addrbook_core::ContactStore`].
//! Tracing layers, TLS and the listener are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, addrbook_api::api_router(store.clone())).await?;
//! ```

pub mod birthdays;
pub mod contacts;
pub mod error;
pub mod health;
pub mod middleware;

use std::sync::Arc;

use addrbook_core::ContactStore;
use axum::{Router, routing::get};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// Every response passes through [`middleware::response_headers`].
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(health::root))
    .route("/api/healthchecker", get(health::healthchecker::<S>))
    // Contacts
    .route("/contacts/", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/birthdays", get(birthdays::upcoming::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .layer(axum::middleware::from_fn(middleware::response_headers))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use addrbook_core::{Contact, NewContact};
  use addrbook_store_sqlite::SqliteStore;
  use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
  };
  use chrono::{Datelike, NaiveDate, Utc};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status  = resp.status();
    let headers = resp.headers().clone();
    let bytes   = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json    = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
  }

  fn body(email: &str) -> Value {
    json!({
      "first_name": "A",
      "last_name":  "B",
      "email":      email,
      "phone":      "123",
      "birthday":   "2000-01-01",
    })
  }

  // ── Root & health ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_reports_version() {
    let app = app().await;
    let (status, _, json) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "Application V0.0.1" }));
  }

  #[tokio::test]
  async fn healthchecker_ok_on_live_store() {
    let app = app().await;
    let (status, _, json) = send(&app, "GET", "/api/healthchecker", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].is_string());
  }

  #[tokio::test]
  async fn every_response_carries_info_headers() {
    let app = app().await;
    for uri in ["/", "/contacts/", "/contacts/77"] {
      let (_, headers, _) = send(&app, "GET", uri, None).await;
      assert_eq!(headers["custom"].to_str().unwrap(), "Example", "{uri}");
      let secs: f64 = headers
        .get("x-process-time")
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
      assert!(secs >= 0.0, "{uri}");
    }
  }

  // ── CRUD scenario ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_read_update_delete_scenario() {
    let app = app().await;

    let (status, _, created) =
      send(&app, "POST", "/contacts/", Some(body("a@x.com"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["email"], "a@x.com");
    assert_eq!(created["birthday"], "2000-01-01");
    assert_eq!(created["additional_data"], Value::Null);

    let (status, _, json) =
      send(&app, "POST", "/contacts/", Some(body("a@x.com"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json, json!({ "detail": "Contact already exists." }));

    let (status, _, fetched) = send(&app, "GET", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _, updated) =
      send(&app, "PUT", "/contacts/1", Some(body("a2@x.com"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["email"], "a2@x.com");

    let (status, _, deleted) = send(&app, "DELETE", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, updated);

    let (status, _, json) = send(&app, "GET", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "NOT FOUND" }));

    let (status, _, _) = send(&app, "DELETE", "/contacts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn list_returns_every_contact() {
    let app = app().await;
    let (_, _, empty) = send(&app, "GET", "/contacts/", None).await;
    assert_eq!(empty, json!([]));

    send(&app, "POST", "/contacts/", Some(body("one@x.com"))).await;
    send(&app, "POST", "/contacts/", Some(body("two@x.com"))).await;

    let (status, _, json) = send(&app, "GET", "/contacts/", None).await;
    assert_eq!(status, StatusCode::OK);
    let contacts: Vec<Contact> = serde_json::from_value(json).unwrap();
    let emails: Vec<_> = contacts.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails, ["one@x.com", "two@x.com"]);
  }

  #[tokio::test]
  async fn update_missing_is_404() {
    let app = app().await;
    let (status, _, json) =
      send(&app, "PUT", "/contacts/12345", Some(body("a@x.com"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "NOT FOUND");
  }

  #[tokio::test]
  async fn update_may_take_another_contacts_email() {
    let app = app().await;
    send(&app, "POST", "/contacts/", Some(body("a@x.com"))).await;
    let (_, _, second) = send(&app, "POST", "/contacts/", Some(body("b@x.com"))).await;

    let uri = format!("/contacts/{}", second["id"]);
    let (status, _, json) = send(&app, "PUT", &uri, Some(body("a@x.com"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "a@x.com");
  }

  // ── Validation ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_field_is_422() {
    let app = app().await;
    let mut b = body("a@x.com");
    b.as_object_mut().unwrap().remove("phone");
    let (status, _, json) = send(&app, "POST", "/contacts/", Some(b)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].is_string());
  }

  #[tokio::test]
  async fn malformed_email_is_422_and_not_stored() {
    let app = app().await;
    let (status, _, _) =
      send(&app, "POST", "/contacts/", Some(body("not-an-email"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, _, json) = send(&app, "GET", "/contacts/", None).await;
    assert_eq!(json, json!([]));
  }

  #[tokio::test]
  async fn bad_birthday_is_422() {
    let app = app().await;
    let mut b = body("a@x.com");
    b["birthday"] = json!("01/01/2000");
    let (status, _, _) = send(&app, "POST", "/contacts/", Some(b)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn non_integer_id_is_rejected() {
    let app = app().await;
    let (status, _, _) = send(&app, "GET", "/contacts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Birthdays ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn birthdays_lists_contacts_celebrating_today() {
    let app = app().await;
    let today = Utc::now().date_naive();

    let mut b = body("today@x.com");
    b["birthday"] = json!(today.with_year(1990).unwrap_or(today).to_string());
    send(&app, "POST", "/contacts/", Some(b)).await;

    // Half a year away from today can never fall in a 7-day window.
    let far = today + chrono::Days::new(180);
    let mut b = body("later@x.com");
    b["birthday"] = json!(far.to_string());
    send(&app, "POST", "/contacts/", Some(b)).await;

    let (status, _, json) = send(&app, "GET", "/contacts/birthdays", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits: Vec<Contact> = serde_json::from_value(json).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email, "today@x.com");
  }

  #[tokio::test]
  async fn birthdays_window_is_capped() {
    let app = app().await;
    let (status, _, _) = send(&app, "GET", "/contacts/birthdays?days=400", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  // ── Health failures ──────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("database unreachable at /var/lib/addrbook.db")]
  struct Down;

  /// A store whose probe either fails or answers with no row.
  struct ProbeStore {
    answers_empty: bool,
  }

  impl ContactStore for ProbeStore {
    type Error = Down;

    async fn find_by_email(&self, _email: &str) -> Result<Option<Contact>, Down> {
      Err(Down)
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Contact>, Down> { Err(Down) }

    async fn list_all(&self) -> Result<Vec<Contact>, Down> { Err(Down) }

    async fn create(&self, _input: NewContact) -> Result<Contact, Down> { Err(Down) }

    async fn update(&self, _id: i64, _input: NewContact) -> Result<Contact, Down> {
      Err(Down)
    }

    async fn delete(&self, _id: i64) -> Result<Contact, Down> { Err(Down) }

    async fn ping(&self) -> Result<Option<i64>, Down> {
      if self.answers_empty { Ok(None) } else { Err(Down) }
    }
  }

  #[tokio::test]
  async fn healthchecker_hides_probe_error() {
    let app = api_router(Arc::new(ProbeStore { answers_empty: false }));
    let (status, _, json) = send(&app, "GET", "/api/healthchecker", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "detail": "Error connecting to the database" }));
  }

  #[tokio::test]
  async fn healthchecker_fails_on_empty_probe() {
    let app = api_router(Arc::new(ProbeStore { answers_empty: true }));
    let (status, _, json) = send(&app, "GET", "/api/healthchecker", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["detail"], "Database is not configured correctly");
  }

  #[tokio::test]
  async fn backend_failure_is_generic_500() {
    let app = api_router(Arc::new(ProbeStore { answers_empty: false }));
    let (status, _, json) = send(&app, "GET", "/contacts/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "detail": "Internal server error" }));
  }

  #[test]
  fn leap_day_contact_deserialises() {
    let c: NewContact = serde_json::from_value(json!({
      "first_name": "L", "last_name": "D", "email": "l@x.com",
      "phone": "1", "birthday": "2000-02-29",
    }))
    .unwrap();
    assert_eq!(c.birthday, NaiveDate::from_ymd_opt(2000, 2, 29).unwrap());
  }
}
