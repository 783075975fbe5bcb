//! Handlers for `/templates` endpoints (read-only).

use axum::extract::{Path, State};
use lawdesk_core::{
  render::Renderer,
  store::CaseStore,
  template::{Template, TemplateKey},
};

use crate::{AppState, error::ApiError, reply::Envelope};

/// `GET /templates`
pub async fn list<S, R>(
  State(state): State<AppState<S, R>>,
) -> Result<Envelope<Vec<Template>>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let templates = state.store.list_templates().await.map_err(ApiError::from_store)?;
  Ok(Envelope::list(templates))
}

/// `GET /templates/{id}`
pub async fn get_one<S, R>(
  State(state): State<AppState<S, R>>,
  Path(id): Path<String>,
) -> Result<Envelope<Template>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  find(&state, TemplateKey::Id(id)).await
}

/// `GET /templates/by-code/{code}`
pub async fn by_code<S, R>(
  State(state): State<AppState<S, R>>,
  Path(code): Path<String>,
) -> Result<Envelope<Template>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  find(&state, TemplateKey::Code(code)).await
}

async fn find<S, R>(state: &AppState<S, R>, key: TemplateKey) -> Result<Envelope<Template>, ApiError>
where
  S: CaseStore,
  R: Renderer,
{
  let template = state
    .store
    .find_template(&key)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| match &key {
      TemplateKey::Id(id) => ApiError::not_found("template", id),
      TemplateKey::Code(code) => ApiError::not_found("template code", code),
    })?;
  Ok(Envelope::new(template))
}
