//! Error types for `lawdesk-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("required field is missing or blank: {0}")]
  BlankField(&'static str),

  #[error("unknown question kind: {0:?}")]
  UnknownQuestionKind(String),

  #[error("unknown advocate status: {0:?}")]
  UnknownAdvocateStatus(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject `None`, empty and whitespace-only values for a required field.
pub fn require(field: &'static str, value: Option<&str>) -> Result<()> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(()),
    _ => Err(Error::BlankField(field)),
  }
}
