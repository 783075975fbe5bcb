//! Handlers for `/cases` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/cases` | Optional `?createdBy=` |
//! | `POST`   | `/cases` | 400 without `scNo`/`description`, 409 on a taken `scNo` |
//! | `GET`    | `/cases/by-filing-number?scNo=` | |
//! | `GET`    | `/cases/{id}` | 404 if not found |
//! | `PUT`    | `/cases/{id}` | Partial update |
//! | `DELETE` | `/cases/{id}` | Removes the case's parties and petitions too |

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use lawdesk_core::{
  case::{Case, CaseKey, CaseUpdate, NewCase},
  render::Renderer,
  store::CaseStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, reply::Envelope};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub created_by: Option<String>,
  pub sc_no:      Option<String>,
}

/// `GET /cases[?createdBy=<user>]`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<ListParams>,
) -> Result<Envelope<Vec<Case>>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let cases = state
    .store
    .list_cases(params.created_by)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Envelope::list(cases))
}

/// `POST /cases`
pub async fn create<S, R>(
  State(state): State<AppState<S, R>>,
  body: Result<Json<NewCase>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let Json(body) = body?;
  let case = state.store.create_case(body).await.map_err(ApiError::from_store)?;
  tracing::info!(case_id = %case.case_id, sc_no = %case.sc_no, "case created");
  Ok((StatusCode::CREATED, Envelope::new(case).message("Case created successfully")))
}

/// `GET /cases/by-filing-number?scNo=<filing number>`
pub async fn by_filing_number<S, R>(
  State(state): State<AppState<S, R>>,
  Query(params): Query<ListParams>,
) -> Result<Envelope<Case>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let sc_no = params
    .sc_no
    .filter(|s| !s.trim().is_empty())
    .ok_or_else(|| ApiError::BadRequest("scNo is required".into()))?;
  let key = CaseKey::FilingNumber(sc_no);
  let case = state
    .store
    .find_case(&key)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("{key} not found")))?;
  Ok(Envelope::new(case))
}

/// `GET /cases/{id}`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Case>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let case = state
    .store
    .find_case(&CaseKey::Id(id.clone()))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("case", &id))?;
  Ok(Envelope::new(case))
}

/// `PUT /cases/{id}`
pub async fn update<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
  body: Result<Json<CaseUpdate>, JsonRejection>,
) -> Result<Envelope<Case>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let Json(body) = body?;
  let case = state
    .store
    .update_case(id.clone(), body)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("case", &id))?;
  Ok(Envelope::new(case).message("Case updated successfully"))
}

/// `DELETE /cases/{id}`
pub async fn delete<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Case>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let case = state
    .store
    .delete_case(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::not_found("case", &id))?;
  tracing::info!(case_id = %case.case_id, "case deleted");
  Ok(Envelope::new(case).message("Case deleted successfully"))
}
