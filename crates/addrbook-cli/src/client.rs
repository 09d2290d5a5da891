//! Async HTTP client wrapping the addrbook JSON API.

use std::time::Duration;

use addrbook_core::{Contact, NewContact};
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Async HTTP client for the addrbook JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Send `req` and decode a JSON success body, or turn the server's
  /// `{"detail": ...}` into an error.
  async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    if !resp.status().is_success() {
      return Err(failure(resp, what).await);
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"))
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  /// `GET /contacts/`
  pub async fn list(&self) -> Result<Vec<Contact>> {
    self.send(self.client.get(self.url("/contacts/")), "GET /contacts/").await
  }

  /// `GET /contacts/{id}`
  pub async fn get(&self, id: i64) -> Result<Contact> {
    let path = format!("/contacts/{id}");
    self.send(self.client.get(self.url(&path)), &format!("GET {path}")).await
  }

  /// `POST /contacts/`
  pub async fn create(&self, contact: &NewContact) -> Result<Contact> {
    self
      .send(
        self.client.post(self.url("/contacts/")).json(contact),
        "POST /contacts/",
      )
      .await
  }

  /// `PUT /contacts/{id}`
  pub async fn update(&self, id: i64, contact: &NewContact) -> Result<Contact> {
    let path = format!("/contacts/{id}");
    self
      .send(
        self.client.put(self.url(&path)).json(contact),
        &format!("PUT {path}"),
      )
      .await
  }

  /// `DELETE /contacts/{id}`
  pub async fn delete(&self, id: i64) -> Result<Contact> {
    let path = format!("/contacts/{id}");
    self.send(self.client.delete(self.url(&path)), &format!("DELETE {path}")).await
  }

  /// `GET /contacts/birthdays?days=<days>`
  pub async fn birthdays(&self, days: u32) -> Result<Vec<Contact>> {
    self
      .send(
        self.client.get(self.url("/contacts/birthdays")).query(&[("days", days)]),
        "GET /contacts/birthdays",
      )
      .await
  }

  // ── Health ────────────────────────────────────────────────────────────────

  /// `GET /api/healthchecker` — returns the server's message.
  pub async fn health(&self) -> Result<String> {
    let body: Value = self
      .send(self.client.get(self.url("/api/healthchecker")), "GET /api/healthchecker")
      .await?;
    Ok(body["message"].as_str().unwrap_or_default().to_owned())
  }
}

async fn failure(resp: Response, what: &str) -> anyhow::Error {
  let status = resp.status();
  let detail = resp
    .json::<Value>()
    .await
    .ok()
    .and_then(|v| v["detail"].as_str().map(str::to_owned));
  match detail {
    Some(d) => anyhow!("{what} → {status}: {d}"),
    None => anyhow!("{what} → {status}"),
  }
}
