//! Handlers for `/complainants` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use lawdesk_core::{
  party::{Complainant, ComplainantUpdate, NewComplainant, PartyQuery},
  render::Renderer,
  store::CaseStore,
};

use crate::{AppState, error::ApiError, reply::Envelope};

pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  Query(query): Query<PartyQuery>,
) -> Result<Envelope<Vec<Complainant>>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let complainants = state
    .store
    .list_complainants(query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Envelope::list(complainants))
}

pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  body: Result<Json<NewComplainant>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let Json(body) = body?;
  let complainant = state.store.add_complainant(body).await.map_err(ApiError::from_store)?;
  tracing::info!(
    complainant_id = %complainant.complainant_id,
    case_id = %complainant.case_id,
    "complainant added"
  );
  Ok((
    StatusCode::CREATED,
    Envelope::new(complainant).message("Complainant created successfully"),
  ))
}

pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Complainant>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let complainant = state
    .store
    .get_complainant(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("complainant", &id))?;
  Ok(Envelope::new(complainant))
}

pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
  body: Result<Json<ComplainantUpdate>, JsonRejection>,
) -> Result<Envelope<Complainant>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let Json(body) = body?;
  let complainant = state
    .store
    .update_complainant(id.clone(), body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("complainant", &id))?;
  Ok(Envelope::new(complainant).message("Complainant updated successfully"))
}

/// `DELETE /complainants/{id}`; answers 409 while petitions still name the
/// complainant.
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Complainant>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let complainant = state
    .store
    .delete_complainant(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("complainant", &id))?;
  Ok(Envelope::new(complainant).message("Complainant deleted successfully"))
}
