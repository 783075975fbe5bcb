//! Error type for `lawdesk-store-sqlite`.

use lawdesk_core::store::ErrorClass;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] lawdesk_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Another case already carries this filing number.
  #[error("a case with filing number {0} already exists")]
  DuplicateFilingNumber(String),

  /// The complainant is still named by filed petitions.
  #[error("complainant {complainant_id} is referenced by {petitions} petition(s)")]
  ComplainantInUse { complainant_id: String, petitions: i64 },

  /// A party was attached to a case that does not exist.
  #[error("case not found: {0}")]
  CaseNotFound(String),

  #[error("a law firm named {0:?} already exists")]
  DuplicateFirmName(String),

  #[error("an advocate with email {0} already exists")]
  DuplicateAdvocateEmail(String),

  /// An advocate was attached to a firm that does not exist.
  #[error("law firm not found: {0}")]
  FirmNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl lawdesk_core::store::Classify for Error {
  fn class(&self) -> ErrorClass {
    match self {
      Error::Core(_) => ErrorClass::Invalid,
      Error::DuplicateFilingNumber(_)
      | Error::ComplainantInUse { .. }
      | Error::DuplicateFirmName(_)
      | Error::DuplicateAdvocateEmail(_) => ErrorClass::Conflict,
      Error::CaseNotFound(_) | Error::FirmNotFound(_) => ErrorClass::MissingParent,
      _ => ErrorClass::Internal,
    }
  }
}
