//! The firm directory: law firms and the advocates registered with them.
//!
//! Advocates are records, not logins. Their `status` gates whether the back
//! office treats them as active; credentials stay with the server's Basic
//! auth boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::require};

// ─── Law firm ────────────────────────────────────────────────────────────────

/// A practice that advocates belong to. Names are unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawFirm {
  pub firm_id:     String,
  pub name:        String,
  pub designation: Option<String>,
  pub address:     Option<String>,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub created_by:  Option<String>,
  pub created_on:  DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewLawFirm {
  pub name:        String,
  pub designation: Option<String>,
  pub address:     Option<String>,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub created_by:  Option<String>,
}

impl NewLawFirm {
  pub fn validate(&self) -> Result<()> { require("name", Some(&self.name)) }
}

// ─── Advocate ────────────────────────────────────────────────────────────────

/// Lifecycle of an advocate record. New records start as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvocateStatus {
  #[default]
  Pending,
  Active,
  Inactive,
}

impl AdvocateStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      AdvocateStatus::Pending => "Pending",
      AdvocateStatus::Active => "Active",
      AdvocateStatus::Inactive => "Inactive",
    }
  }

  pub fn is_active(self) -> bool { self == AdvocateStatus::Active }
}

impl std::str::FromStr for AdvocateStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "Pending" => Ok(AdvocateStatus::Pending),
      "Active" => Ok(AdvocateStatus::Active),
      "Inactive" => Ok(AdvocateStatus::Inactive),
      other => Err(Error::UnknownAdvocateStatus(other.to_owned())),
    }
  }
}

/// An advocate on the firm directory. Email addresses are unique ignoring
/// case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
  pub advocate_id:    String,
  pub name:           String,
  pub email:          String,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  /// Cleared when the firm is deleted.
  pub firm_id:        Option<String>,
  pub status:         AdvocateStatus,
  pub email_verified: bool,
  pub created_by:     Option<String>,
  pub created_on:     DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewAdvocate {
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub address:    Option<String>,
  pub firm_id:    Option<String>,
  pub created_by: Option<String>,
}

impl NewAdvocate {
  pub fn validate(&self) -> Result<()> {
    require("name", Some(&self.name))?;
    require("email", Some(&self.email))
  }
}

/// Partial update; `None` keeps the stored value. Status changes go through
/// [`DirectoryStore::set_advocate_status`](crate::store::DirectoryStore::set_advocate_status).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateUpdate {
  pub name:    Option<String>,
  pub email:   Option<String>,
  pub phone:   Option<String>,
  pub address: Option<String>,
  pub firm_id: Option<String>,
}

impl AdvocateUpdate {
  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      require("name", Some(name))?;
    }
    if let Some(email) = &self.email {
      require("email", Some(email))?;
    }
    Ok(())
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

/// An advocate together with the firm it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateProfile {
  #[serde(flatten)]
  pub advocate: Advocate,
  pub law_firm: Option<LawFirm>,
}

/// A firm and its advocates, ordered by name; the admin overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmRoster {
  #[serde(flatten)]
  pub firm:           LawFirm,
  pub advocates:      Vec<Advocate>,
  pub advocate_count: usize,
}

impl FirmRoster {
  pub fn new(firm: LawFirm, advocates: Vec<Advocate>) -> Self {
    Self { advocate_count: advocates.len(), firm, advocates }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn status_parses_stored_labels_only() {
    assert_eq!("Active".parse::<AdvocateStatus>().unwrap(), AdvocateStatus::Active);
    assert!(matches!(
      "active".parse::<AdvocateStatus>(),
      Err(Error::UnknownAdvocateStatus(s)) if s == "active"
    ));
    assert_eq!(AdvocateStatus::default(), AdvocateStatus::Pending);
  }

  #[test]
  fn new_advocate_needs_name_and_email() {
    let input: NewAdvocate = serde_json::from_value(json!({ "name": "R. Kumar" })).unwrap();
    assert!(matches!(input.validate(), Err(Error::BlankField("email"))));

    let blank_name = AdvocateUpdate { name: Some("  ".into()), ..Default::default() };
    assert!(matches!(blank_name.validate(), Err(Error::BlankField("name"))));
  }

  #[test]
  fn roster_serializes_flat_with_count() {
    let at = DateTime::parse_from_rfc3339("2024-03-07T12:00:00Z").unwrap().with_timezone(&Utc);
    let firm = LawFirm {
      firm_id:     "LF001".into(),
      name:        "Iyer & Co".into(),
      designation: None,
      address:     None,
      phone:       None,
      email:       None,
      created_by:  None,
      created_on:  at,
    };
    let value = serde_json::to_value(FirmRoster::new(firm, Vec::new())).unwrap();
    assert_eq!(value["firmId"], "LF001");
    assert_eq!(value["advocateCount"], 0);
    assert_eq!(value["advocates"], json!([]));
  }
}
