//! Template data mapper.
//!
//! Turns a case, its accused parties and the client's free-form answers into
//! the [`TemplateData`] payload the render service fills its layouts with.
//! The mapper never fails: every missing input falls back to a default from
//! [`MapperDefaults`]. Structural gaps the caller should know about (no named
//! accused, no defendants for a power of attorney) are reported as
//! [`MappingWarning`]s alongside the data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  answers::Answers,
  case::Case,
  party::Accused,
  template::RenderCode,
};

// ─── Defaults ────────────────────────────────────────────────────────────────

/// Fallback values substituted for answers the client left out.
///
/// Loaded from the `[mapper]` section of the server configuration; the
/// `Default` impl carries the values the production templates were laid out
/// with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperDefaults {
  pub court_name:             String,
  pub section_number:         String,
  pub respondent_name:        String,
  pub respondent_address:     String,
  pub place:                  String,
  pub advocate_city:          String,
  pub advocate_address_line1: String,
  pub advocate_address_line2: String,
  pub advocate_address_line3: String,
  pub tribunal_location:      String,
  pub oa_number:              String,
}

impl Default for MapperDefaults {
  fn default() -> Self {
    Self {
      court_name:             "COIMBATORE".into(),
      section_number:         "355(1)".into(),
      respondent_name:        "INSPECTOR OF POLICE".into(),
      respondent_address:     "PERIYANAIKENPALAYAM POLICE STATION, Coimbatore.".into(),
      place:                  "Coimbatore".into(),
      advocate_city:          "Coimbatore".into(),
      advocate_address_line1: "78/82, Semi Basement,".into(),
      advocate_address_line2: "Govt. Arts College Road,".into(),
      advocate_address_line3: "Cheran Towers,".into(),
      tribunal_location:      "COIMBATORE".into(),
      oa_number:              "182".into(),
    }
  }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// One accused party as the render service expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccusedLine {
  pub name:         String,
  #[serde(rename = "AccusedName")]
  pub display_name: String,
  pub designation:  String,
  pub address:      String,
}

/// The power-of-attorney projection of an accused party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefendantLine {
  /// `"1."`, `"2."`, …
  pub number:       String,
  pub name:         String,
  #[serde(rename = "AccusedName")]
  pub display_name: String,
  pub designation:  String,
  pub address:      String,
  pub signature:    String,
}

/// Normalised payload handed to the render service as `formData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
  pub case_number:             String,
  pub court_name:              String,
  pub accused:                 Vec<AccusedLine>,
  pub defendants:              Vec<DefendantLine>,
  pub section_number:          String,
  pub respondent_name:         String,
  pub respondent_address:      String,
  pub respondent_station:      String,
  pub petition_points:         Vec<String>,
  pub point1:                  String,
  pub point2:                  String,
  pub point3:                  String,
  pub point4:                  String,
  pub prayer:                  String,
  pub day:                     String,
  pub month:                   String,
  pub year:                    String,
  pub place:                   String,
  pub hearing_date:            String,
  pub advocate_name:           String,
  pub advocate_address:        String,
  pub advocate_city:           String,
  pub advocate_phone:          String,
  pub advocate_email:          String,
  pub advocate_address_line1:  String,
  pub advocate_address_line2:  String,
  pub advocate_address_line3:  String,
  pub court_full_name:         String,
  pub tribunal_location:       String,
  pub applicant_name:          String,
  pub applicant_branch:        String,
  pub applicant_address:       String,
  pub oa_number:               String,
  pub oa_year:                 String,
  pub advocate_enrollment:     String,
  pub advocates_list:          String,
  pub execution_day:           String,
  pub execution_month:         String,
  pub execution_year:          String,
  /// Multi-select reasons, passed through untouched.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub accused_reasons:         Option<Value>,
  /// Per-accused reasons from the legacy `num_accused` form.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reasons:                 Option<Vec<String>>,
}

/// Conditions that do not stop generation but leave the document incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingWarning {
  /// No accused party with a non-blank name; the document names no one.
  NoAccused,
  /// Power-of-attorney template with an empty defendants list.
  NoDefendants,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedTemplate {
  pub data:     TemplateData,
  pub warnings: Vec<MappingWarning>,
}

// ─── Mapping ─────────────────────────────────────────────────────────────────

/// Build the render payload for `code` from the case, its accused and the
/// submitted answers. `today` supplies every date the answers leave out.
pub fn map_answers(
  answers:  &Answers,
  code:     RenderCode,
  case:     &Case,
  accused:  &[Accused],
  today:    NaiveDate,
  defaults: &MapperDefaults,
) -> MappedTemplate {
  let mut warnings = Vec::new();

  let accused_lines = format_accused(accused);
  if accused_lines.is_empty() {
    tracing::warn!(case_id = %case.case_id, "no named accused; accused list will be empty");
    warnings.push(MappingWarning::NoAccused);
  }

  let defendants = if code.is_power_of_attorney() {
    let defendants = defendants_view(&accused_lines);
    if defendants.is_empty() {
      tracing::warn!(case_id = %case.case_id, "power of attorney without defendants");
      warnings.push(MappingWarning::NoDefendants);
    }
    defendants
  } else {
    Vec::new()
  };

  let points = petition_points(answers);
  let point = |i: usize| {
    points
      .positional
      .get(i)
      .filter(|p| !p.trim().is_empty())
      .cloned()
      .or_else(|| answers.text(&format!("point{}", i + 1)))
      .unwrap_or_default()
  };

  let day = today.day().to_string();
  let month = today.format("%B").to_string();
  let year = today.year().to_string();

  let case_number = if case.sc_no.is_empty() {
    answers.text_or("case_number", "")
  } else {
    case.sc_no.clone()
  };

  let data = TemplateData {
    case_number,
    court_name: answers.text_or("court_name", &defaults.court_name),
    accused: accused_lines,
    defendants,
    section_number: answers.text_or("section_number", &defaults.section_number),
    respondent_name: answers.text_or("respondent_name", &defaults.respondent_name),
    respondent_address: respondent_address(
      answers.text("respondent_station").as_deref(),
      answers.text("respondent_address").as_deref(),
      &defaults.respondent_address,
    ),
    respondent_station: answers.text_or("respondent_station", ""),
    point1: point(0),
    point2: point(1),
    point3: point(2),
    point4: point(3),
    petition_points: points.canonical,
    prayer: answers.text_or("prayer", ""),
    day: answers.text_or("day", &day),
    month: answers.text_or("month", &month),
    year: answers.text_or("year", &year),
    place: answers.text_or("place", &defaults.place),
    hearing_date: answers
      .text("hearing_date")
      .unwrap_or_else(|| today.format("%d/%m/%Y").to_string()),
    advocate_name: answers.text_or("advocate_name", ""),
    advocate_address: answers.text_or("advocate_address", ""),
    advocate_city: answers.text_or("advocate_city", &defaults.advocate_city),
    advocate_phone: answers.text_or("advocate_phone", ""),
    advocate_email: answers.text_or("advocate_email", ""),
    advocate_address_line1: answers
      .text_or("advocate_address_line1", &defaults.advocate_address_line1),
    advocate_address_line2: answers
      .text_or("advocate_address_line2", &defaults.advocate_address_line2),
    advocate_address_line3: answers
      .text_or("advocate_address_line3", &defaults.advocate_address_line3),
    court_full_name: answers.text_or("court_full_name", ""),
    tribunal_location: answers.text_or("tribunal_location", &defaults.tribunal_location),
    applicant_name: answers.text_or("applicant_name", ""),
    applicant_branch: answers.text_or("applicant_branch", ""),
    applicant_address: answers.text_or("applicant_address", ""),
    oa_number: answers.text_or("oa_number", &defaults.oa_number),
    oa_year: answers.text_or("oa_year", &year),
    advocate_enrollment: answers.text_or("advocate_enrollment", ""),
    advocates_list: answers.text_or("advocates_list", ""),
    execution_day: answers.text_or("execution_day", &day),
    execution_month: answers.text_or("execution_month", &month),
    execution_year: answers.text_or("execution_year", &year),
    accused_reasons: answers
      .get("accused_reasons")
      .filter(|v| v.is_object())
      .cloned(),
    reasons: accused_reasons(answers),
  };

  MappedTemplate { data, warnings }
}

/// Named accused only, in stored order; designation falls back to `A<n>`.
fn format_accused(accused: &[Accused]) -> Vec<AccusedLine> {
  accused
    .iter()
    .filter(|a| !a.name.trim().is_empty())
    .enumerate()
    .map(|(i, a)| {
      let name = a.name.trim().to_owned();
      AccusedLine {
        display_name: name.clone(),
        name,
        designation: a
          .accused_no
          .as_deref()
          .filter(|n| !n.is_empty())
          .map(str::to_owned)
          .unwrap_or_else(|| format!("A{}", i + 1)),
        address: a.address.clone().unwrap_or_default(),
      }
    })
    .collect()
}

fn defendants_view(accused: &[AccusedLine]) -> Vec<DefendantLine> {
  accused
    .iter()
    .enumerate()
    .map(|(i, a)| DefendantLine {
      number:       format!("{}.", i + 1),
      name:         a.name.clone(),
      display_name: a.display_name.clone(),
      designation:  a.designation.clone(),
      address:      a.address.clone(),
      signature:    String::new(),
    })
    .collect()
}

/// Combine station and address without repeating the station when the
/// address already mentions it.
pub fn respondent_address(
  station: Option<&str>,
  address: Option<&str>,
  default: &str,
) -> String {
  let station = station.map(str::trim).filter(|s| !s.is_empty());
  let address = address.map(str::trim).filter(|s| !s.is_empty());
  match (station, address) {
    (Some(station), Some(address)) => {
      if address.to_lowercase().contains(&station.to_lowercase()) {
        address.to_owned()
      } else {
        format!("{station}, {address}")
      }
    }
    (Some(only), None) | (None, Some(only)) => only.to_owned(),
    (None, None) => default.to_owned(),
  }
}

struct PetitionPoints {
  /// The `petition_points` list as submitted, blanks included, so that entry
  /// `i` lines up with the legacy `point<i+1>` field.
  positional: Vec<String>,
  /// What the template renders as its point list.
  canonical:  Vec<String>,
}

fn petition_points(answers: &Answers) -> PetitionPoints {
  let positional = answers.list("petition_points").unwrap_or_default();
  let structured: Vec<String> = positional
    .iter()
    .filter(|p| !p.trim().is_empty())
    .cloned()
    .collect();

  let canonical = if structured.is_empty() {
    (1..=4)
      .filter_map(|i| answers.text(&format!("point{i}")))
      .filter(|p| !p.trim().is_empty())
      .collect()
  } else {
    structured
  };

  PetitionPoints { positional, canonical }
}

/// Indexed `reason_accused_<i>` fields first; a single shared
/// `reason_accused` fills every slot only when no indexed field is present.
fn accused_reasons(answers: &Answers) -> Option<Vec<String>> {
  let count = answers.count("num_accused")?;

  let mut reasons: Vec<String> = (1..=count)
    .filter_map(|i| answers.text(&format!("reason_accused_{i}")))
    .collect();

  if reasons.is_empty()
    && let Some(shared) = answers.text("reason_accused")
  {
    reasons = vec![shared; count];
  }

  Some(reasons)
}
