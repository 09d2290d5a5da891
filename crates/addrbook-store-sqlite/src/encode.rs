//! Conversions between domain types and the plain-text representations
//! stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings.

use addrbook_core::Contact;
use chrono::NaiveDate;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column list shared by every `SELECT` and `RETURNING` clause, in the order
/// [`RawContact::from_row`] expects.
pub const CONTACT_COLUMNS: &str =
  "id, first_name, last_name, email, phone, birthday, additional_data";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// A `contacts` row as read from SQLite, before date decoding.
///
/// Decoding happens outside the connection closure so that parse failures
/// surface as [`Error::DateParse`] rather than as driver errors.
#[derive(Debug)]
pub struct RawContact {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone:           String,
  pub birthday:        String,
  pub additional_data: Option<String>,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      first_name:      row.get(1)?,
      last_name:       row.get(2)?,
      email:           row.get(3)?,
      phone:           row.get(4)?,
      birthday:        row.get(5)?,
      additional_data: row.get(6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:              self.id,
      first_name:      self.first_name,
      last_name:       self.last_name,
      email:           self.email,
      phone:           self.phone,
      birthday:        decode_date(&self.birthday)?,
      additional_data: self.additional_data,
    })
  }
}
