//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use addrbook_core::{Contact, ContactStore, NewContact};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All clones
/// share one connection thread, which executes calls one at a time.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Owned column values for an INSERT or UPDATE, movable into a connection
/// closure.
struct Columns {
  first_name:      String,
  last_name:       String,
  email:           String,
  phone:           String,
  birthday:        String,
  additional_data: Option<String>,
}

impl From<NewContact> for Columns {
  fn from(c: NewContact) -> Self {
    Self {
      first_name:      c.first_name,
      last_name:       c.last_name,
      email:           c.email,
      phone:           c.phone,
      birthday:        encode_date(c.birthday),
      additional_data: c.additional_data,
    }
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-row `SELECT` over `contacts` with one bound parameter.
  async fn select_one<P>(&self, filter: &'static str, param: P) -> Result<Option<Contact>>
  where
    P: rusqlite::ToSql + Send + 'static,
  {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE {filter} LIMIT 1"),
            rusqlite::params![param],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  // ── Lookups ───────────────────────────────────────────────────────────────

  async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
    self.select_one("email = ?1", email.to_owned()).await
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
    self.select_one("id = ?1", id).await
  }

  async fn list_all(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, input: NewContact) -> Result<Contact> {
    let row = Columns::from(input);

    // Lookup and insert share one closure, so no other call on this
    // connection can run between them.
    let outcome: std::result::Result<RawContact, addrbook_core::Error> = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM contacts WHERE email = ?1 LIMIT 1",
            rusqlite::params![row.email],
            |_| Ok(()),
          )
          .optional()?
          .is_some();

        if taken {
          return Ok(Err(addrbook_core::Error::Conflict(row.email)));
        }

        let raw = conn.query_row(
          &format!(
            "INSERT INTO contacts (
               first_name, last_name, email, phone, birthday, additional_data
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {CONTACT_COLUMNS}"
          ),
          rusqlite::params![
            row.first_name,
            row.last_name,
            row.email,
            row.phone,
            row.birthday,
            row.additional_data,
          ],
          RawContact::from_row,
        )?;
        Ok(Ok(raw))
      })
      .await?;

    let contact = outcome?.into_contact()?;
    tracing::debug!(id = contact.id, "created contact");
    Ok(contact)
  }

  async fn update(&self, id: i64, input: NewContact) -> Result<Contact> {
    let row = Columns::from(input);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE contacts SET
                 first_name = ?2, last_name = ?3, email = ?4,
                 phone = ?5, birthday = ?6, additional_data = ?7
               WHERE id = ?1
               RETURNING {CONTACT_COLUMNS}"
            ),
            rusqlite::params![
              id,
              row.first_name,
              row.last_name,
              row.email,
              row.phone,
              row.birthday,
              row.additional_data,
            ],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    let contact = raw.ok_or(addrbook_core::Error::NotFound(id))?.into_contact()?;
    tracing::debug!(id, "updated contact");
    Ok(contact)
  }

  async fn delete(&self, id: i64) -> Result<Contact> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("DELETE FROM contacts WHERE id = ?1 RETURNING {CONTACT_COLUMNS}"),
            rusqlite::params![id],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    let contact = raw.ok_or(addrbook_core::Error::NotFound(id))?.into_contact()?;
    tracing::debug!(id, "deleted contact");
    Ok(contact)
  }

  // ── Health ────────────────────────────────────────────────────────────────

  async fn ping(&self) -> Result<Option<i64>> {
    let one: Option<i64> = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT 1", [], |r| r.get(0)).optional()?))
      .await?;
    Ok(one)
  }
}
