//! Petition orchestrator.
//!
//! [`Petitioner::create`] runs the whole petition-creation workflow: validate
//! the request, resolve the case, its accused and the template, map the
//! answers, render the document, store it, and file the petition record
//! together with its complainant.
//!
//! The pipeline is linear. Rendering is the one optional step: a render or
//! storage failure is logged and the petition is filed without a document.
//! Complainant resolution is the one hard dependency after validation,
//! because a petition record cannot exist without a complainant.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
  answers::Answers,
  artifacts::ArtifactStore,
  case::CaseKey,
  mapper::{MapperDefaults, MappingWarning, map_answers},
  party::{Accused, NewComplainant, PartyQuery},
  petition::{NewPetition, Petition},
  render::Renderer,
  store::{CaseStore, FilingError},
  template::TemplateKey,
};

/// Source of the current time. Its offset decides which calendar day the
/// petition is dated; the host zone is used unless one is injected.
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

// ─── Request / outcome ───────────────────────────────────────────────────────

/// Body of a petition-creation request. Required fields are optional here so
/// that their absence surfaces as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionRequest {
  #[serde(default, deserialize_with = "lenient_id")]
  pub case_id:       Option<String>,
  #[serde(default, deserialize_with = "lenient_id")]
  pub template_id:   Option<String>,
  pub template_name: Option<String>,
  pub answers:       Option<Answers>,
  pub created_by:    Option<String>,
}

/// Accept identifiers sent as either JSON strings or numbers.
fn lenient_id<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Option::<Value>::deserialize(de)? {
    Some(Value::String(s)) => Some(s),
    Some(Value::Number(n)) => Some(n.to_string()),
    _ => None,
  })
}

/// Everything the caller needs to report a filed petition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionOutcome {
  #[serde(flatten)]
  pub petition:            Petition,
  pub template_name:       String,
  pub answers:             Answers,
  /// `false` means the record exists but rendering or storage failed.
  pub document_generated:  bool,
  pub complainant_created: bool,
  pub warnings:            Vec<MappingWarning>,
}

impl PetitionOutcome {
  /// Absolute retrieval URL for the stored document, if there is one.
  pub fn document_url(&self, base_url: &str) -> Option<String> {
    self
      .petition
      .document_path
      .as_ref()
      .map(|path| format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/')))
  }
}

#[derive(Debug, Error)]
pub enum PetitionError<E: std::error::Error + 'static> {
  #[error("{0}")]
  Validation(String),

  #[error("case not found: {0}")]
  CaseNotFound(String),

  #[error("template not found: {0}")]
  TemplateNotFound(String),

  #[error("store error: {0}")]
  Store(#[source] E),

  /// The case had no complainant and the placeholder could not be created.
  #[error("no complainant found for case {case_id} and a default could not be created")]
  Dependency {
    case_id: String,
    #[source]
    source:  E,
  },

  #[error("failed to create petition record: {0}")]
  Persistence(#[source] E),
}

// ─── Orchestrator ────────────────────────────────────────────────────────────

/// Coordinates the store, the renderer and the artifact store.
///
/// Built once at start-up and shared; holds no per-request state.
pub struct Petitioner<S, R, A> {
  store:     Arc<S>,
  renderer:  Arc<R>,
  artifacts: Arc<A>,
  defaults:  MapperDefaults,
  clock:     Clock,
}

impl<S, R, A> Petitioner<S, R, A>
where
  S: CaseStore,
  R: Renderer,
  A: ArtifactStore,
{
  pub fn new(store: Arc<S>, renderer: Arc<R>, artifacts: Arc<A>) -> Self {
    Self {
      store,
      renderer,
      artifacts,
      defaults: MapperDefaults::default(),
      clock: Arc::new(|| Local::now().fixed_offset()),
    }
  }

  pub fn with_defaults(mut self, defaults: MapperDefaults) -> Self {
    self.defaults = defaults;
    self
  }

  pub fn with_clock(
    mut self,
    clock: impl Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
  ) -> Self {
    self.clock = Arc::new(clock);
    self
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Run the petition-creation workflow.
  pub async fn create(
    &self,
    request: PetitionRequest,
  ) -> Result<PetitionOutcome, PetitionError<S::Error>> {
    let (case_id, template_id, answers) = match (
      non_blank(request.case_id),
      non_blank(request.template_id),
      request.answers,
    ) {
      (Some(c), Some(t), Some(a)) => (c, t, a),
      _ => {
        return Err(PetitionError::Validation(
          "Missing required fields: caseId, templateId, and answers are required".into(),
        ));
      }
    };
    let created_by = non_blank(request.created_by);

    let case = self
      .store
      .find_case(&CaseKey::Id(case_id.clone()))
      .await
      .map_err(PetitionError::Store)?
      .ok_or_else(|| PetitionError::CaseNotFound(case_id.clone()))?;

    let accused = self.resolve_accused(&case.case_id, &answers).await;

    let template = self
      .store
      .find_template(&TemplateKey::Id(template_id.clone()))
      .await
      .map_err(PetitionError::Store)?
      .ok_or_else(|| PetitionError::TemplateNotFound(template_id.clone()))?;

    let code = template.render_code();
    let now = (self.clock)();
    let today = now.date_naive();
    let mapped = map_answers(&answers, code, &case, &accused, today, &self.defaults);
    tracing::debug!(
      case_id = %case.case_id,
      render_code = %code,
      accused = mapped.data.accused.len(),
      defendants = mapped.data.defendants.len(),
      "mapped answers to template data"
    );

    let document_path = match self.renderer.render(code, &mapped.data).await {
      Ok(pdf) => {
        let file_name = format!("{}_{}.pdf", case.case_id, now.timestamp_millis());
        match self.artifacts.save_petition(&file_name, pdf).await {
          Ok(path) => Some(path),
          Err(e) => {
            tracing::warn!(case_id = %case.case_id, error = %e, "could not store rendered petition; continuing without document");
            None
          }
        }
      }
      Err(failure) => {
        tracing::warn!(case_id = %case.case_id, error = %failure, "render failed; continuing without document");
        None
      }
    };

    let filing = self
      .store
      .file_petition(
        NewPetition {
          case_id:       case.case_id.clone(),
          template_id:   template.template_id.clone(),
          document_path: document_path.clone(),
          created_by:    created_by.clone(),
        },
        NewComplainant::placeholder(&case.case_id, created_by.as_deref()),
      )
      .await
      .map_err(|e| match e {
        FilingError::Complainant(source) => {
          tracing::error!(case_id = %case.case_id, error = %source, "failed to create default complainant");
          PetitionError::Dependency { case_id: case.case_id.clone(), source }
        }
        FilingError::Petition(source) => {
          tracing::error!(case_id = %case.case_id, error = %source, "failed to write petition record");
          PetitionError::Persistence(source)
        }
      })?;

    if filing.complainant_created {
      tracing::info!(
        case_id = %case.case_id,
        complainant_id = %filing.complainant.complainant_id,
        "created default complainant"
      );
    }
    tracing::info!(
      petition_id = %filing.petition.petition_id,
      case_id = %case.case_id,
      document = document_path.is_some(),
      "petition filed"
    );

    Ok(PetitionOutcome {
      template_name:       non_blank(request.template_name)
        .unwrap_or_else(|| template.template_name.clone()),
      document_generated:  filing.petition.document_path.is_some(),
      petition:            filing.petition,
      answers,
      complainant_created: filing.complainant_created,
      warnings:            mapped.warnings,
    })
  }

  /// Accused of the case, narrowed to `selected_accused_ids` when given.
  /// A lookup failure is not fatal: the petition is drafted with no accused.
  async fn resolve_accused(&self, case_id: &str, answers: &Answers) -> Vec<Accused> {
    let all = match self.store.list_accused(PartyQuery::for_case(case_id)).await {
      Ok(all) => all,
      Err(e) => {
        tracing::warn!(case_id, error = %e, "could not fetch accused; continuing without them");
        return Vec::new();
      }
    };

    match answers.list("selected_accused_ids") {
      Some(selected) => all
        .into_iter()
        .filter(|a| selected.iter().any(|key| a.answers_to(key)))
        .collect(),
      None => all,
    }
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
