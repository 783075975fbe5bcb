//! Handlers for `/advocates` endpoints.
//!
//! Activation only flips the record's status; it grants no login.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use lawdesk_core::{
  directory::{Advocate, AdvocateProfile, AdvocateStatus, AdvocateUpdate, NewAdvocate},
  render::Renderer,
  store::DirectoryStore,
};

use crate::{AppState, error::ApiError, firms::SearchParams, reply::Envelope};

/// `GET /advocates[?search=]`; matches name, email or phone.
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<SearchParams>,
) -> Result<Envelope<Vec<Advocate>>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let advocates = state
    .store
    .list_advocates(params.search)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Envelope::list(advocates))
}

pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  body: Result<Json<NewAdvocate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let Json(body) = body?;
  let advocate = state.store.add_advocate(body).await.map_err(ApiError::from_store)?;
  tracing::info!(
    advocate_id = %advocate.advocate_id,
    firm_id = advocate.firm_id.as_deref().unwrap_or(""),
    "advocate added"
  );
  Ok((
    StatusCode::CREATED,
    Envelope::new(advocate).message("Advocate created successfully"),
  ))
}

/// `GET /advocates/{id}`; the advocate with its firm, if any.
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<AdvocateProfile>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let advocate = state
    .store
    .get_advocate(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("advocate", &id))?;
  let law_firm = match &advocate.firm_id {
    Some(firm_id) => state
      .store
      .get_law_firm(firm_id.clone())
      .await
      .map_err(ApiError::from_store)?,
    None => None,
  };
  Ok(Envelope::new(AdvocateProfile { advocate, law_firm }))
}

pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
  body: Result<Json<AdvocateUpdate>, JsonRejection>,
) -> Result<Envelope<Advocate>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let Json(body) = body?;
  let advocate = state
    .store
    .update_advocate(id.clone(), body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("advocate", &id))?;
  Ok(Envelope::new(advocate).message("Advocate updated successfully"))
}

pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Advocate>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let advocate = state
    .store
    .delete_advocate(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("advocate", &id))?;
  Ok(Envelope::new(advocate).message("Advocate deleted successfully"))
}

/// `PATCH /advocates/{id}/activate`
pub async fn activate<S, R>(
  state: State<AppState<S, R>>,
  id: Path<String>,
) -> Result<Envelope<Advocate>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  set_status(state, id, AdvocateStatus::Active).await
}

/// `PATCH /advocates/{id}/deactivate`
pub async fn deactivate<S, R>(
  state: State<AppState<S, R>>,
  id: Path<String>,
) -> Result<Envelope<Advocate>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  set_status(state, id, AdvocateStatus::Inactive).await
}

async fn set_status<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
  status: AdvocateStatus,
) -> Result<Envelope<Advocate>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let advocate = state
    .store
    .set_advocate_status(id.clone(), status)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("advocate", &id))?;
  tracing::info!(advocate_id = %advocate.advocate_id, status = status.as_str(), "advocate status changed");
  let message = if status.is_active() {
    "Advocate activated successfully"
  } else {
    "Advocate deactivated successfully"
  };
  Ok(Envelope::new(advocate).message(message))
}
