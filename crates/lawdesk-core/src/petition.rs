//! Petition records, the persisted result of generating a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document instance generated from a template for a case.
///
/// `complainant_id` is always present: the store refuses to file a petition
/// without resolving (or synthesising) a complainant first. `document_path`
/// is `None` when rendering failed and the record was kept anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Petition {
  pub petition_id:    String,
  pub case_id:        String,
  pub complainant_id: String,
  pub template_id:    String,
  /// Path relative to the artifacts root, e.g. `uploads/petitions/…pdf`.
  pub document_path:  Option<String>,
  pub created_by:     Option<String>,
  pub created_on:     DateTime<Utc>,
}

/// Input for [`CaseStore::file_petition`](crate::store::CaseStore::file_petition).
/// The complainant is resolved inside the store transaction.
#[derive(Debug, Clone)]
pub struct NewPetition {
  pub case_id:       String,
  pub template_id:   String,
  pub document_path: Option<String>,
  pub created_by:    Option<String>,
}

/// Filters for [`CaseStore::list_petitions`](crate::store::CaseStore::list_petitions).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionQuery {
  pub case_id:    Option<String>,
  pub created_by: Option<String>,
}
