//! Parties to a case: accused (defendants) and complainants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, error::require};

// ─── Accused ─────────────────────────────────────────────────────────────────

/// A named defendant associated with a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accused {
  pub accused_id:     String,
  pub case_id:        String,
  pub name:           String,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub address:        Option<String>,
  /// Ordinal label as written in the charge sheet, e.g. `A1`.
  pub accused_no:     Option<String>,
  /// Path of an uploaded signature image, relative to the artifacts root.
  pub signature_path: Option<String>,
  pub created_by:     Option<String>,
  pub created_on:     DateTime<Utc>,
}

impl Accused {
  /// Whether `key` names this party, either by ID or by ordinal label.
  pub fn answers_to(&self, key: &str) -> bool {
    self.accused_id == key || self.accused_no.as_deref() == Some(key)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewAccused {
  pub case_id:        String,
  pub name:           String,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub address:        Option<String>,
  pub accused_no:     Option<String>,
  pub signature_path: Option<String>,
  pub created_by:     Option<String>,
}

impl NewAccused {
  pub fn validate(&self) -> Result<()> {
    require("caseId", Some(&self.case_id))?;
    require("name", Some(&self.name))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccusedUpdate {
  pub name:           Option<String>,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub address:        Option<String>,
  pub accused_no:     Option<String>,
  pub signature_path: Option<String>,
}

/// How a caller addresses an accused party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccusedKey {
  Id(String),
  /// The ordinal label (`accused_no`).
  Number(String),
}

// ─── Complainant ─────────────────────────────────────────────────────────────

/// The party bringing the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complainant {
  pub complainant_id: String,
  pub case_id:        String,
  pub name:           String,
  pub address:        Option<String>,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub created_by:     Option<String>,
  pub created_on:     DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewComplainant {
  pub case_id:    String,
  pub name:       String,
  pub address:    Option<String>,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub created_by: Option<String>,
}

impl NewComplainant {
  pub const PLACEHOLDER_NAME: &'static str = "Default Complainant";
  pub const PLACEHOLDER_ADDRESS: &'static str = "Address not provided";

  /// The stand-in complainant filed when a case has none at petition time.
  pub fn placeholder(case_id: &str, created_by: Option<&str>) -> Self {
    Self {
      case_id:    case_id.to_owned(),
      name:       Self::PLACEHOLDER_NAME.to_owned(),
      address:    Some(Self::PLACEHOLDER_ADDRESS.to_owned()),
      phone:      Some(String::new()),
      email:      Some(String::new()),
      created_by: Some(created_by.unwrap_or("system").to_owned()),
    }
  }

  pub fn validate(&self) -> Result<()> {
    require("caseId", Some(&self.case_id))?;
    require("name", Some(&self.name))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplainantUpdate {
  pub name:    Option<String>,
  pub address: Option<String>,
  pub phone:   Option<String>,
  pub email:   Option<String>,
}

/// Filters shared by the accused and complainant listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyQuery {
  pub case_id:    Option<String>,
  pub created_by: Option<String>,
}

impl PartyQuery {
  pub fn for_case(case_id: &str) -> Self {
    Self { case_id: Some(case_id.to_owned()), created_by: None }
  }
}
