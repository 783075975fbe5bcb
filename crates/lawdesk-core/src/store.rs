//! The `CaseStore` and `DirectoryStore` traits and supporting types.
//!
//! The traits are implemented by storage backends (e.g. `lawdesk-store-sqlite`).
//! Higher layers (`lawdesk-api`, the orchestrator) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use thiserror::Error;

use crate::{
  case::{Case, CaseKey, CaseUpdate, NewCase},
  directory::{
    Advocate, AdvocateStatus, AdvocateUpdate, FirmRoster, LawFirm, NewAdvocate,
    NewLawFirm,
  },
  party::{
    Accused, AccusedKey, AccusedUpdate, Complainant, ComplainantUpdate,
    NewAccused, NewComplainant, PartyQuery,
  },
  petition::{NewPetition, Petition, PetitionQuery},
  template::{Template, TemplateKey},
};

// ─── Error classes ───────────────────────────────────────────────────────────

/// How a backend error should be reported to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  /// The input broke a domain rule.
  Invalid,
  /// The input collides with existing data (e.g. a taken filing number).
  Conflict,
  /// The input refers to a parent record that does not exist.
  MissingParent,
  Internal,
}

/// Implemented by backend error types so that upper layers can pick a
/// response without knowing the backend.
pub trait Classify {
  fn class(&self) -> ErrorClass { ErrorClass::Internal }
}

// ─── Filing ──────────────────────────────────────────────────────────────────

/// Result of [`CaseStore::file_petition`].
#[derive(Debug, Clone)]
pub struct Filing {
  pub petition:            Petition,
  pub complainant:         Complainant,
  /// `true` when the complainant is the placeholder created for this filing.
  pub complainant_created: bool,
}

/// Which half of a filing failed. Either way nothing was committed.
#[derive(Debug, Error)]
pub enum FilingError<E: std::error::Error + 'static> {
  #[error("could not resolve or create a complainant: {0}")]
  Complainant(#[source] E),

  #[error("could not write the petition record: {0}")]
  Petition(#[source] E),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a lawdesk store backend.
///
/// Identifiers and timestamps are assigned by the store. Listings are newest
/// first. `get_*`/`find_*` return `None` when nothing matches; `update_*` and
/// `delete_*` return `None` when the target does not exist.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Cases ─────────────────────────────────────────────────────────────

  /// Create a case. Fails if the filing number is already taken.
  fn create_case(
    &self,
    input: NewCase,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  fn find_case<'a>(
    &'a self,
    key: &'a CaseKey,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + 'a;

  fn list_cases(
    &self,
    created_by: Option<String>,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  fn update_case(
    &self,
    case_id: String,
    update: CaseUpdate,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Delete a case together with its parties and petition records.
  fn delete_case(
    &self,
    case_id: String,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  // ── Accused ───────────────────────────────────────────────────────────

  fn add_accused(
    &self,
    input: NewAccused,
  ) -> impl Future<Output = Result<Accused, Self::Error>> + Send + '_;

  fn find_accused<'a>(
    &'a self,
    key: &'a AccusedKey,
  ) -> impl Future<Output = Result<Option<Accused>, Self::Error>> + Send + 'a;

  fn list_accused(
    &self,
    query: PartyQuery,
  ) -> impl Future<Output = Result<Vec<Accused>, Self::Error>> + Send + '_;

  fn update_accused(
    &self,
    accused_id: String,
    update: AccusedUpdate,
  ) -> impl Future<Output = Result<Option<Accused>, Self::Error>> + Send + '_;

  fn delete_accused(
    &self,
    accused_id: String,
  ) -> impl Future<Output = Result<Option<Accused>, Self::Error>> + Send + '_;

  // ── Complainants ──────────────────────────────────────────────────────

  fn add_complainant(
    &self,
    input: NewComplainant,
  ) -> impl Future<Output = Result<Complainant, Self::Error>> + Send + '_;

  fn get_complainant(
    &self,
    complainant_id: String,
  ) -> impl Future<Output = Result<Option<Complainant>, Self::Error>> + Send + '_;

  fn list_complainants(
    &self,
    query: PartyQuery,
  ) -> impl Future<Output = Result<Vec<Complainant>, Self::Error>> + Send + '_;

  fn update_complainant(
    &self,
    complainant_id: String,
    update: ComplainantUpdate,
  ) -> impl Future<Output = Result<Option<Complainant>, Self::Error>> + Send + '_;

  /// Fails with a [`ErrorClass::Conflict`] error while any petition still
  /// refers to the complainant.
  fn delete_complainant(
    &self,
    complainant_id: String,
  ) -> impl Future<Output = Result<Option<Complainant>, Self::Error>> + Send + '_;

  // ── Templates (read-only) ─────────────────────────────────────────────

  fn list_templates(
    &self,
  ) -> impl Future<Output = Result<Vec<Template>, Self::Error>> + Send + '_;

  fn find_template<'a>(
    &'a self,
    key: &'a TemplateKey,
  ) -> impl Future<Output = Result<Option<Template>, Self::Error>> + Send + 'a;

  // ── Petitions ─────────────────────────────────────────────────────────

  /// In one transaction: take the newest complainant of the case, or insert
  /// `placeholder` if there is none, then insert the petition record linked
  /// to it. Nothing is committed unless both steps succeed.
  fn file_petition(
    &self,
    input: NewPetition,
    placeholder: NewComplainant,
  ) -> impl Future<Output = Result<Filing, FilingError<Self::Error>>> + Send + '_;

  fn get_petition(
    &self,
    petition_id: String,
  ) -> impl Future<Output = Result<Option<Petition>, Self::Error>> + Send + '_;

  fn list_petitions(
    &self,
    query: PetitionQuery,
  ) -> impl Future<Output = Result<Vec<Petition>, Self::Error>> + Send + '_;

  fn update_document_path(
    &self,
    petition_id: String,
    document_path: Option<String>,
  ) -> impl Future<Output = Result<Option<Petition>, Self::Error>> + Send + '_;

  /// Delete the record only; stored documents are left in place.
  fn delete_petition(
    &self,
    petition_id: String,
  ) -> impl Future<Output = Result<Option<Petition>, Self::Error>> + Send + '_;
}

// ─── Directory ───────────────────────────────────────────────────────────────

/// Law firms and advocates. The petition workflow needs only [`CaseStore`].
///
/// Directory listings are ordered by name. `search` matches a substring
/// ignoring case; for advocates it also matches email and phone.
pub trait DirectoryStore: CaseStore {
  // ── Law firms ─────────────────────────────────────────────────────────

  /// Fails with a conflict when a firm of the same name (ignoring case)
  /// exists.
  fn create_law_firm(
    &self,
    input: NewLawFirm,
  ) -> impl Future<Output = Result<LawFirm, Self::Error>> + Send + '_;

  fn list_law_firms(
    &self,
    search: Option<String>,
  ) -> impl Future<Output = Result<Vec<LawFirm>, Self::Error>> + Send + '_;

  fn get_law_firm(
    &self,
    firm_id: String,
  ) -> impl Future<Output = Result<Option<LawFirm>, Self::Error>> + Send + '_;

  /// Advocates of the firm are kept and left without a firm.
  fn delete_law_firm(
    &self,
    firm_id: String,
  ) -> impl Future<Output = Result<Option<LawFirm>, Self::Error>> + Send + '_;

  /// Every firm whose name contains `firm_name`, each with its advocates.
  fn firm_rosters(
    &self,
    firm_name: Option<String>,
  ) -> impl Future<Output = Result<Vec<FirmRoster>, Self::Error>> + Send + '_;

  // ── Advocates ─────────────────────────────────────────────────────────

  /// The advocate starts `Pending` and unverified. Fails when the firm does
  /// not exist or the email is taken.
  fn add_advocate(
    &self,
    input: NewAdvocate,
  ) -> impl Future<Output = Result<Advocate, Self::Error>> + Send + '_;

  fn list_advocates(
    &self,
    search: Option<String>,
  ) -> impl Future<Output = Result<Vec<Advocate>, Self::Error>> + Send + '_;

  fn get_advocate(
    &self,
    advocate_id: String,
  ) -> impl Future<Output = Result<Option<Advocate>, Self::Error>> + Send + '_;

  fn update_advocate(
    &self,
    advocate_id: String,
    update: AdvocateUpdate,
  ) -> impl Future<Output = Result<Option<Advocate>, Self::Error>> + Send + '_;

  fn set_advocate_status(
    &self,
    advocate_id: String,
    status: AdvocateStatus,
  ) -> impl Future<Output = Result<Option<Advocate>, Self::Error>> + Send + '_;

  fn delete_advocate(
    &self,
    advocate_id: String,
  ) -> impl Future<Output = Result<Option<Advocate>, Self::Error>> + Send + '_;
}
