//! The `Contact` entity and its creation/update payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A persisted contact. `id` is assigned by the store at creation and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone:           String,
  pub birthday:        NaiveDate,
  pub additional_data: Option<String>,
}

/// Every mutable field of a [`Contact`]. Used for both create and update;
/// update overwrites all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone:           String,
  pub birthday:        NaiveDate,
  #[serde(default)]
  pub additional_data: Option<String>,
}

impl NewContact {
  /// Field-level checks applied before a payload reaches the store.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("first_name", &self.first_name),
      ("last_name", &self.last_name),
      ("email", &self.email),
      ("phone", &self.phone),
    ] {
      if value.trim().is_empty() {
        return Err(Error::Invalid(format!("{field} must not be empty")));
      }
    }

    let well_formed = self
      .email
      .split_once('@')
      .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
      return Err(Error::Invalid(format!(
        "email {:?} is not a valid address",
        self.email
      )));
    }

    Ok(())
  }

  /// Attach a store-assigned id.
  pub fn with_id(self, id: i64) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      phone: self.phone,
      birthday: self.birthday,
      additional_data: self.additional_data,
    }
  }
}
