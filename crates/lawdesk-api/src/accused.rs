//! Handlers for `/accused` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use lawdesk_core::{
  party::{Accused, AccusedKey, AccusedUpdate, NewAccused, PartyQuery},
  render::Renderer,
  store::CaseStore,
};

use crate::{AppState, error::ApiError, reply::Envelope};

/// `GET /accused[?caseId=&createdBy=]`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  Query(query): Query<PartyQuery>,
) -> Result<Envelope<Vec<Accused>>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let accused = state.store.list_accused(query).await.map_err(ApiError::from_store)?;
  Ok(Envelope::list(accused))
}

/// `POST /accused`; 404 when the case does not exist.
pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  body: Result<Json<NewAccused>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let Json(body) = body?;
  let accused = state.store.add_accused(body).await.map_err(ApiError::from_store)?;
  tracing::info!(accused_id = %accused.accused_id, case_id = %accused.case_id, "accused added");
  Ok((StatusCode::CREATED, Envelope::new(accused).message("Accused created successfully")))
}

/// `GET /accused/by-number/{no}`
pub async fn by_number<S, R>(
  State(state): State<AppState<S, R>>,
  Path(no): Path<String>,
) -> Result<Envelope<Accused>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let accused = state
    .store
    .find_accused(&AccusedKey::Number(no.clone()))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("accused number", &no))?;
  Ok(Envelope::new(accused))
}

/// `GET /accused/{id}`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Accused>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let accused = state
    .store
    .find_accused(&AccusedKey::Id(id.clone()))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("accused", &id))?;
  Ok(Envelope::new(accused))
}

/// `PUT /accused/{id}`
pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
  body: Result<Json<AccusedUpdate>, JsonRejection>,
) -> Result<Envelope<Accused>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let Json(body) = body?;
  let accused = state
    .store
    .update_accused(id.clone(), body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("accused", &id))?;
  Ok(Envelope::new(accused).message("Accused updated successfully"))
}

/// `DELETE /accused/{id}`
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Accused>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let accused = state
    .store
    .delete_accused(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("accused", &id))?;
  Ok(Envelope::new(accused).message("Accused deleted successfully"))
}
