//! Row decoding and column encoding between domain types and SQLite.
//!
//! Timestamps are stored as RFC 3339 strings with fixed microsecond precision
//! so that lexical order equals chronological order. Template questions are
//! stored as a JSON array; advocate status as its label.

use chrono::{DateTime, SecondsFormat, Utc};
use lawdesk_core::{
  case::Case,
  directory::{Advocate, LawFirm},
  party::{Accused, Complainant},
  petition::Petition,
  template::{Question, Template},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Current time truncated to what the store can represent.
pub fn now() -> DateTime<Utc> {
  let now = Utc::now();
  decode_dt(&encode_dt(now)).unwrap_or(now)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub const CASE_COLUMNS: &str = "case_id, description, sc_no, court_name, case_type, \
                                court_city, court_state, created_by, created_on";

pub struct RawCase {
  pub case_id:     String,
  pub description: String,
  pub sc_no:       String,
  pub court_name:  Option<String>,
  pub case_type:   Option<String>,
  pub court_city:  Option<String>,
  pub court_state: Option<String>,
  pub created_by:  Option<String>,
  pub created_on:  String,
}

impl RawCase {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      case_id:     row.get(0)?,
      description: row.get(1)?,
      sc_no:       row.get(2)?,
      court_name:  row.get(3)?,
      case_type:   row.get(4)?,
      court_city:  row.get(5)?,
      court_state: row.get(6)?,
      created_by:  row.get(7)?,
      created_on:  row.get(8)?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      created_on:  decode_dt(&self.created_on)?,
      case_id:     self.case_id,
      description: self.description,
      sc_no:       self.sc_no,
      court_name:  self.court_name,
      case_type:   self.case_type,
      court_city:  self.court_city,
      court_state: self.court_state,
      created_by:  self.created_by,
    })
  }
}

pub const ACCUSED_COLUMNS: &str = "accused_id, case_id, name, phone, email, address, \
                                   accused_no, signature_path, created_by, created_on";

pub struct RawAccused {
  pub accused_id:     String,
  pub case_id:        String,
  pub name:           String,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub address:        Option<String>,
  pub accused_no:     Option<String>,
  pub signature_path: Option<String>,
  pub created_by:     Option<String>,
  pub created_on:     String,
}

impl RawAccused {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      accused_id:     row.get(0)?,
      case_id:        row.get(1)?,
      name:           row.get(2)?,
      phone:          row.get(3)?,
      email:          row.get(4)?,
      address:        row.get(5)?,
      accused_no:     row.get(6)?,
      signature_path: row.get(7)?,
      created_by:     row.get(8)?,
      created_on:     row.get(9)?,
    })
  }

  pub fn into_accused(self) -> Result<Accused> {
    Ok(Accused {
      created_on:     decode_dt(&self.created_on)?,
      accused_id:     self.accused_id,
      case_id:        self.case_id,
      name:           self.name,
      phone:          self.phone,
      email:          self.email,
      address:        self.address,
      accused_no:     self.accused_no,
      signature_path: self.signature_path,
      created_by:     self.created_by,
    })
  }
}

pub const COMPLAINANT_COLUMNS: &str = "complainant_id, case_id, name, address, phone, email, \
                                       created_by, created_on";

pub struct RawComplainant {
  pub complainant_id: String,
  pub case_id:        String,
  pub name:           String,
  pub address:        Option<String>,
  pub phone:          Option<String>,
  pub email:          Option<String>,
  pub created_by:     Option<String>,
  pub created_on:     String,
}

impl RawComplainant {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      complainant_id: row.get(0)?,
      case_id:        row.get(1)?,
      name:           row.get(2)?,
      address:        row.get(3)?,
      phone:          row.get(4)?,
      email:          row.get(5)?,
      created_by:     row.get(6)?,
      created_on:     row.get(7)?,
    })
  }

  pub fn into_complainant(self) -> Result<Complainant> {
    Ok(Complainant {
      created_on:     decode_dt(&self.created_on)?,
      complainant_id: self.complainant_id,
      case_id:        self.case_id,
      name:           self.name,
      address:        self.address,
      phone:          self.phone,
      email:          self.email,
      created_by:     self.created_by,
    })
  }
}

pub const TEMPLATE_COLUMNS: &str = "template_id, template_code, template_name, questions, created_on";

pub struct RawTemplate {
  pub template_id:   String,
  pub template_code: String,
  pub template_name: String,
  pub questions:     String,
  pub created_on:    String,
}

impl RawTemplate {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      template_id:   row.get(0)?,
      template_code: row.get(1)?,
      template_name: row.get(2)?,
      questions:     row.get(3)?,
      created_on:    row.get(4)?,
    })
  }

  pub fn into_template(self) -> Result<Template> {
    let questions: Vec<Question> = serde_json::from_str(&self.questions)?;
    Ok(Template {
      created_on: decode_dt(&self.created_on)?,
      template_id: self.template_id,
      template_code: self.template_code,
      template_name: self.template_name,
      questions,
    })
  }
}

pub const PETITION_COLUMNS: &str = "petition_id, case_id, complainant_id, template_id, \
                                    document_path, created_by, created_on";

pub struct RawPetition {
  pub petition_id:    String,
  pub case_id:        String,
  pub complainant_id: String,
  pub template_id:    String,
  pub document_path:  Option<String>,
  pub created_by:     Option<String>,
  pub created_on:     String,
}

impl RawPetition {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      petition_id:    row.get(0)?,
      case_id:        row.get(1)?,
      complainant_id: row.get(2)?,
      template_id:    row.get(3)?,
      document_path:  row.get(4)?,
      created_by:     row.get(5)?,
      created_on:     row.get(6)?,
    })
  }

  pub fn into_petition(self) -> Result<Petition> {
    Ok(Petition {
      created_on:     decode_dt(&self.created_on)?,
      petition_id:    self.petition_id,
      case_id:        self.case_id,
      complainant_id: self.complainant_id,
      template_id:    self.template_id,
      document_path:  self.document_path,
      created_by:     self.created_by,
    })
  }
}

pub const LAW_FIRM_COLUMNS: &str = "firm_id, name, designation, address, phone, email, \
                                    created_by, created_on";

pub struct RawLawFirm {
  pub firm_id:     String,
  pub name:        String,
  pub designation: Option<String>,
  pub address:     Option<String>,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub created_by:  Option<String>,
  pub created_on:  String,
}

impl RawLawFirm {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      firm_id:     row.get(0)?,
      name:        row.get(1)?,
      designation: row.get(2)?,
      address:     row.get(3)?,
      phone:       row.get(4)?,
      email:       row.get(5)?,
      created_by:  row.get(6)?,
      created_on:  row.get(7)?,
    })
  }

  pub fn into_law_firm(self) -> Result<LawFirm> {
    Ok(LawFirm {
      created_on:  decode_dt(&self.created_on)?,
      firm_id:     self.firm_id,
      name:        self.name,
      designation: self.designation,
      address:     self.address,
      phone:       self.phone,
      email:       self.email,
      created_by:  self.created_by,
    })
  }
}

pub const ADVOCATE_COLUMNS: &str = "advocate_id, name, email, phone, address, firm_id, \
                                    status, email_verified, created_by, created_on";

pub struct RawAdvocate {
  pub advocate_id:    String,
  pub name:           String,
  pub email:          String,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  pub firm_id:        Option<String>,
  pub status:         String,
  pub email_verified: bool,
  pub created_by:     Option<String>,
  pub created_on:     String,
}

impl RawAdvocate {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      advocate_id:    row.get(0)?,
      name:           row.get(1)?,
      email:          row.get(2)?,
      phone:          row.get(3)?,
      address:        row.get(4)?,
      firm_id:        row.get(5)?,
      status:         row.get(6)?,
      email_verified: row.get(7)?,
      created_by:     row.get(8)?,
      created_on:     row.get(9)?,
    })
  }

  pub fn into_advocate(self) -> Result<Advocate> {
    Ok(Advocate {
      created_on:     decode_dt(&self.created_on)?,
      status:         self.status.parse()?,
      advocate_id:    self.advocate_id,
      name:           self.name,
      email:          self.email,
      phone:          self.phone,
      address:        self.address,
      firm_id:        self.firm_id,
      email_verified: self.email_verified,
      created_by:     self.created_by,
    })
  }
}
