//! Petition templates and the question schema the client app renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Questions ───────────────────────────────────────────────────────────────

/// Input widget the client should present for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  Text,
  Textarea,
  Number,
  Date,
  Dropdown,
  MultiSelect,
}

impl QuestionKind {
  pub fn as_str(self) -> &'static str {
    match self {
      QuestionKind::Text => "text",
      QuestionKind::Textarea => "textarea",
      QuestionKind::Number => "number",
      QuestionKind::Date => "date",
      QuestionKind::Dropdown => "dropdown",
      QuestionKind::MultiSelect => "multi_select",
    }
  }
}

impl std::str::FromStr for QuestionKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "text" => Ok(QuestionKind::Text),
      "textarea" => Ok(QuestionKind::Textarea),
      "number" => Ok(QuestionKind::Number),
      "date" => Ok(QuestionKind::Date),
      "dropdown" => Ok(QuestionKind::Dropdown),
      "multi_select" => Ok(QuestionKind::MultiSelect),
      other => Err(Error::UnknownQuestionKind(other.to_owned())),
    }
  }
}

/// One entry of a template's question schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  /// Answer key the client submits, e.g. `respondent_station`.
  pub question_id:   String,
  pub question_text: String,
  pub question_type: QuestionKind,
  pub is_required:   bool,
  pub placeholder:   String,
  /// Choice set for dropdown / multi-select questions.
  pub options:       Option<Vec<String>>,
}

// ─── Template ────────────────────────────────────────────────────────────────

/// Reusable document layout with a defined question schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
  pub template_id:   String,
  /// Stable code, e.g. `TEMP-001`.
  pub template_code: String,
  pub template_name: String,
  pub questions:     Vec<Question>,
  pub created_on:    DateTime<Utc>,
}

impl Template {
  /// Translate this template into the render service's numeric identifier.
  pub fn render_code(&self) -> RenderCode {
    RenderCode::resolve(&self.template_code, &self.template_id)
  }
}

/// How a caller addresses a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKey {
  Id(String),
  Code(String),
}

// ─── Render code ─────────────────────────────────────────────────────────────

/// Numeric template identifier understood by the external render service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderCode(pub u32);

impl RenderCode {
  pub const PETITION: RenderCode = RenderCode(1);
  /// Vakalathnama; the only layout that lists defendants separately.
  pub const POWER_OF_ATTORNEY: RenderCode = RenderCode(2);

  /// Known codes first, then a positive numeric template ID, then `1`.
  pub fn resolve(template_code: &str, template_id: &str) -> RenderCode {
    match template_code {
      "TEMP-001" => Self::PETITION,
      "TEMP-002" => Self::POWER_OF_ATTORNEY,
      _ => template_id
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .map(RenderCode)
        .unwrap_or(Self::PETITION),
    }
  }

  pub fn is_power_of_attorney(self) -> bool { self == Self::POWER_OF_ATTORNEY }
}

impl std::fmt::Display for RenderCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}
