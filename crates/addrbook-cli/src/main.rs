//! `addrbook` — command-line client for the addrbook contact server.
//!
//! # Usage
//!
//! ```
//! addrbook --url http://localhost:8000 list
//! addrbook add --first-name Ada --last-name Lovelace \
//!   --email ada@example.com --phone 555-0100 --birthday 1815-12-10
//! addrbook --config ~/.config/addrbook/config.toml birthdays --days 14
//! ```

mod client;

use addrbook_core::NewContact;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use client::ApiClient;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "addrbook", about = "Command-line client for the addrbook server")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the addrbook server (default: http://localhost:8000).
  #[arg(long, env = "ADDRBOOK_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every contact.
  List,
  /// Show one contact.
  Get { id: i64 },
  /// Create a contact.
  Add(ContactArgs),
  /// Overwrite every field of a contact.
  Update {
    id: i64,
    #[command(flatten)]
    contact: ContactArgs,
  },
  /// Delete a contact.
  Delete { id: i64 },
  /// Contacts with a birthday in the next few days.
  Birthdays {
    #[arg(long, default_value_t = addrbook_core::birthday::DEFAULT_WINDOW_DAYS)]
    days: u32,
  },
  /// Check that the server can reach its database.
  Health,
}

#[derive(ClapArgs, Debug)]
struct ContactArgs {
  #[arg(long)]
  first_name: String,
  #[arg(long)]
  last_name:  String,
  #[arg(long)]
  email:      String,
  #[arg(long)]
  phone:      String,
  /// Date of birth, `YYYY-MM-DD`.
  #[arg(long)]
  birthday:   NaiveDate,
  /// Free-form notes.
  #[arg(long)]
  notes:      Option<String>,
}

impl From<ContactArgs> for NewContact {
  fn from(a: ContactArgs) -> Self {
    NewContact {
      first_name:      a.first_name,
      last_name:       a.last_name,
      email:           a.email,
      phone:           a.phone,
      birthday:        a.birthday,
      additional_data: a.notes,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag / env overrides config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  tracing::debug!(%base_url, "using server");

  let api = ApiClient::new(base_url)?;

  match args.command {
    Command::List => print(&api.list().await?),
    Command::Get { id } => print(&api.get(id).await?),
    Command::Add(contact) => print(&api.create(&contact.into()).await?),
    Command::Update { id, contact } => print(&api.update(id, &contact.into()).await?),
    Command::Delete { id } => print(&api.delete(id).await?),
    Command::Birthdays { days } => print(&api.birthdays(days).await?),
    Command::Health => {
      println!("{}", api.health().await?);
      Ok(())
    }
  }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
