//! Handlers for `/law-firms` and the `/admin/firms` overview.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/law-firms` | Optional `?search=`, ordered by name |
//! | `POST`   | `/law-firms` | 400 without `name`, 409 on a taken name (any case) |
//! | `GET`    | `/law-firms/{id}` | 404 if not found |
//! | `DELETE` | `/law-firms/{id}` | Advocates stay, without a firm |
//! | `GET`    | `/admin/firms` | Firms with their advocates; optional `?firmName=` |

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use lawdesk_core::{
  directory::{FirmRoster, LawFirm, NewLawFirm},
  render::Renderer,
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, reply::Envelope};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterParams {
  pub firm_name: Option<String>,
}

pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<SearchParams>,
) -> Result<Envelope<Vec<LawFirm>>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let firms = state
    .store
    .list_law_firms(params.search)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Envelope::list(firms))
}

pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  body: Result<Json<NewLawFirm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let Json(body) = body?;
  let firm = state.store.create_law_firm(body).await.map_err(ApiError::from_store)?;
  tracing::info!(firm_id = %firm.firm_id, name = %firm.name, "law firm created");
  Ok((
    StatusCode::CREATED,
    Envelope::new(firm).message("Law firm created successfully"),
  ))
}

pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<LawFirm>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let firm = state
    .store
    .get_law_firm(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("law firm", &id))?;
  Ok(Envelope::new(firm))
}

pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<LawFirm>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let firm = state
    .store
    .delete_law_firm(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("law firm", &id))?;
  tracing::info!(firm_id = %firm.firm_id, "law firm deleted");
  Ok(Envelope::new(firm).message("Law firm deleted successfully"))
}

/// `GET /admin/firms[?firmName=]`
pub async fn rosters<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<RosterParams>,
) -> Result<Envelope<Vec<FirmRoster>>, ApiError>
where
  S: DirectoryStore,
  R: Renderer,
{
  let rosters = state
    .store
    .firm_rosters(params.firm_name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Envelope::list(rosters))
}
