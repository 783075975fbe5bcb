//! Cases: the legal matters every other entity hangs off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, error::require};

/// A legal matter tracked by the service.
///
/// `case_id` is assigned by the store (`CASE001`, `CASE002`, …) and never
/// changes. `sc_no` is the external filing number and is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
  pub case_id:     String,
  pub description: String,
  pub sc_no:       String,
  pub court_name:  Option<String>,
  pub case_type:   Option<String>,
  pub court_city:  Option<String>,
  pub court_state: Option<String>,
  pub created_by:  Option<String>,
  pub created_on:  DateTime<Utc>,
}

/// Input for [`CaseStore::create_case`](crate::store::CaseStore::create_case).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewCase {
  pub description: String,
  pub sc_no:       String,
  pub court_name:  Option<String>,
  pub case_type:   Option<String>,
  pub court_city:  Option<String>,
  pub court_state: Option<String>,
  pub created_by:  Option<String>,
}

impl NewCase {
  pub fn validate(&self) -> Result<()> {
    require("scNo", Some(&self.sc_no))?;
    require("description", Some(&self.description))
  }
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
  pub description: Option<String>,
  pub sc_no:       Option<String>,
  pub court_name:  Option<String>,
  pub case_type:   Option<String>,
  pub court_city:  Option<String>,
  pub court_state: Option<String>,
  pub created_by:  Option<String>,
}

/// How a caller addresses a case.
///
/// Endpoints that accept either the internal identifier or the filing number
/// say which one they mean instead of guessing from the shape of the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseKey {
  Id(String),
  FilingNumber(String),
}

impl CaseKey {
  pub fn as_str(&self) -> &str {
    match self {
      CaseKey::Id(s) | CaseKey::FilingNumber(s) => s,
    }
  }
}

impl std::fmt::Display for CaseKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CaseKey::Id(id) => write!(f, "case {id}"),
      CaseKey::FilingNumber(no) => write!(f, "case with filing number {no}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_case_requires_filing_number_and_description() {
    let mut c = NewCase {
      description: "Theft".into(),
      sc_no:       "SC/1/2024".into(),
      ..Default::default()
    };
    assert!(c.validate().is_ok());

    c.sc_no = "  ".into();
    assert!(c.validate().is_err());

    c.sc_no = "SC/1/2024".into();
    c.description = String::new();
    assert!(c.validate().is_err());
  }

  #[test]
  fn case_key_display_names_the_lookup() {
    assert_eq!(CaseKey::Id("CASE001".into()).to_string(), "case CASE001");
    assert_eq!(
      CaseKey::FilingNumber("SC/1".into()).to_string(),
      "case with filing number SC/1"
    );
  }
}
