//! Handlers for `/petitions` endpoints.
//!
//! `POST /petitions` runs the petition workflow; the other routes manage the
//! stored records. Every response carries `documentUrl` when the petition has
//! a stored document.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use lawdesk_core::{
  orchestrator::{PetitionOutcome, PetitionRequest},
  petition::{Petition, PetitionQuery},
  render::Renderer,
  store::CaseStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, reply::Envelope};

/// A petition record plus its retrieval URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionView {
  #[serde(flatten)]
  pub petition:     Petition,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub document_url: Option<String>,
}

impl PetitionView {
  fn new(petition: Petition, base: &str) -> Self {
    let document_url = petition
      .document_path
      .as_deref()
      .map(|path| format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')));
    Self { petition, document_url }
  }
}

/// Response body of `POST /petitions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionCreated {
  #[serde(flatten)]
  pub outcome:      PetitionOutcome,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub document_url: Option<String>,
}

/// `POST /petitions`
pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  headers: HeaderMap,
  body: Result<Json<PetitionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore + 'static,
  R: Renderer + 'static,
{
  let Json(body) = body?;
  let outcome = state.petitioner.create(body).await?;
  let document_url = outcome.document_url(&state.document_base(&headers));

  let message = if outcome.document_generated {
    "Petition created successfully"
  } else {
    "Petition created; the document could not be generated"
  };
  Ok((
    StatusCode::CREATED,
    Envelope::new(PetitionCreated { outcome, document_url }).message(message),
  ))
}

/// `GET /petitions[?caseId=&createdBy=]`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  headers: HeaderMap,
  Query(query): Query<PetitionQuery>,
) -> Result<Envelope<Vec<PetitionView>>, ApiError>
where
  S: CaseStore + 'static,
  R: Renderer + 'static,
{
  let base = state.document_base(&headers);
  let petitions = state
    .store
    .list_petitions(query)
    .await
    .map_err(ApiError::from_store)?
    .into_iter()
    .map(|p| PetitionView::new(p, &base))
    .collect();
  Ok(Envelope::list(petitions))
}

/// `GET /petitions/{id}`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  headers: HeaderMap,
  Path(id): Path<String>,
) -> Result<Envelope<PetitionView>, ApiError>
where
  S: CaseStore + 'static,
  R: Renderer + 'static,
{
  let petition = state
    .store
    .get_petition(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("petition", &id))?;
  Ok(Envelope::new(PetitionView::new(petition, &state.document_base(&headers))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub document_path: Option<String>,
}

/// `PUT /petitions/{id}`; body `{"documentPath": "..."}` (null clears it).
pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  headers: HeaderMap,
  Path(id): Path<String>,
  body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Envelope<PetitionView>, ApiError>
where
  S: CaseStore + 'static,
  R: Renderer + 'static,
{
  let Json(body) = body?;
  let petition = state
    .store
    .update_document_path(id.clone(), body.document_path)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("petition", &id))?;
  Ok(
    Envelope::new(PetitionView::new(petition, &state.document_base(&headers)))
      .message("Petition updated successfully"),
  )
}

/// `DELETE /petitions/{id}`; the stored document stays on disk.
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Petition>, ApiError>
where
  S: CaseStore + 'static,
  R: Renderer + 'static,
{
  let petition = state
    .store
    .delete_petition(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("petition", &id))?;

  if let Some(path) = &petition.document_path {
    tracing::warn!(petition_id = %petition.petition_id, %path, "petition deleted; stored document retained");
  }
  Ok(Envelope::new(petition).message("Petition deleted successfully"))
}
