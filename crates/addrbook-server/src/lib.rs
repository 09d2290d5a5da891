//! Server wiring for addrbook: configuration and the top-level router.
//!
//! The `server` binary in `src/bin/server.rs` is a thin shell around this.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use addrbook_core::ContactStore;
use axum::Router;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Environment prefix for overrides, e.g. `ADDRBOOK_PORT=9000`.
pub const ENV_PREFIX: &str = "ADDRBOOK";

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_database_path() -> PathBuf { PathBuf::from("addrbook.db") }

impl ServerConfig {
  /// Layer the optional file at `path` under `ADDRBOOK_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX)),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder.build()?.try_deserialize()
  }

  /// `host:port`, ready for `TcpListener::bind`.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with HTTP request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ContactStore + 'static,
{
  addrbook_api::api_router(store).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use addrbook_store_sqlite::SqliteStore;
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use config::FileFormat;
  use tower::ServiceExt as _;

  fn from_toml(toml: &str) -> Result<ServerConfig, ConfigError> {
    ServerConfig::from_builder(
      Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("").unwrap();
    assert_eq!(cfg, ServerConfig {
      host:          "127.0.0.1".into(),
      port:          8000,
      database_path: PathBuf::from("addrbook.db"),
    });
    assert_eq!(cfg.address(), "127.0.0.1:8000");
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml("host = \"0.0.0.0\"\nport = 9090\ndatabase_path = \"/tmp/c.db\"\n")
      .unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:9090");
    assert_eq!(cfg.database_path, PathBuf::from("/tmp/c.db"));
  }

  #[test]
  fn bad_port_is_rejected() {
    assert!(from_toml("port = \"not a number\"").is_err());
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/addrbook/config.toml")).unwrap();
    assert!(!cfg.host.is_empty());
  }

  #[test]
  fn tilde_is_expanded_only_at_start() {
    assert_eq!(expand_tilde(Path::new("/abs/~/x")), PathBuf::from("/abs/~/x"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/data/addrbook.db")),
        PathBuf::from(home).join("data/addrbook.db")
      );
    }
  }

  #[tokio::test]
  async fn traced_app_serves_root() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let resp = app(Arc::new(store))
      .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-process-time"));
  }
}
