//! Upcoming-birthday arithmetic.
//!
//! A birthday on February 29 is celebrated on February 28 in non-leap years.

use chrono::{Datelike, NaiveDate};

use crate::Contact;

/// Default look-ahead window for [`upcoming`], in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Largest window accepted by the API.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// The anniversary of `birthday` in `year`.
fn anniversary_in(birthday: NaiveDate, year: i32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
    .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
    .unwrap_or(birthday)
}

/// The first anniversary of `birthday` falling on or after `today`.
pub fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
  let this_year = anniversary_in(birthday, today.year());
  if this_year >= today {
    this_year
  } else {
    anniversary_in(birthday, today.year() + 1)
  }
}

/// Contacts whose next birthday lies within `days` days of `today`
/// (inclusive on both ends), ordered by that date and then by id.
pub fn upcoming(contacts: Vec<Contact>, today: NaiveDate, days: u32) -> Vec<Contact> {
  let mut hits: Vec<(NaiveDate, Contact)> = contacts
    .into_iter()
    .filter_map(|c| {
      let next = next_occurrence(c.birthday, today);
      let until = (next - today).num_days();
      (until <= i64::from(days)).then_some((next, c))
    })
    .collect();

  hits.sort_by(|(a, ca), (b, cb)| a.cmp(b).then(ca.id.cmp(&cb.id)));
  hits.into_iter().map(|(_, c)| c).collect()
}
