//! SQL schema for the addrbook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS contacts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    email           TEXT NOT NULL,   -- uniqueness checked on create only
    phone           TEXT NOT NULL,
    birthday        TEXT NOT NULL,   -- YYYY-MM-DD
    additional_data TEXT
);

CREATE INDEX IF NOT EXISTS contacts_email_idx ON contacts(email);

PRAGMA user_version = 1;
";
