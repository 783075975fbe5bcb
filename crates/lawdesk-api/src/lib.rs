//! JSON REST API for lawdesk.
//!
//! Exposes an axum [`Router`] backed by any [`DirectoryStore`] and
//! [`Renderer`]: case, party, template and firm-directory CRUD under `/api`,
//! the petition workflow at `POST /api/petitions`, stored documents under
//! `/uploads`, and an unauthenticated `/health` probe.

pub mod accused;
pub mod advocates;
pub mod artifacts;
pub mod auth;
pub mod cases;
pub mod complainants;
pub mod error;
pub mod firms;
pub mod petitions;
pub mod reply;
pub mod templates;

use std::sync::Arc;

use axum::{
  Json, Router,
  http::{HeaderMap, header},
  middleware,
  routing::{get, patch},
};
use chrono::{FixedOffset, Utc};
use lawdesk_core::{
  mapper::MapperDefaults,
  orchestrator::Petitioner,
  render::Renderer,
  store::{CaseStore, DirectoryStore},
};
use serde_json::{Value, json};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use artifacts::FsArtifactStore;
pub use auth::AuthConfig;
pub use error::ApiError;
pub use reply::Envelope;

// ─── Application state ───────────────────────────────────────────────────────

/// Optional behaviour of the API, filled from server configuration.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
  /// When set, every `/api` route requires these Basic credentials.
  pub auth:            Option<AuthConfig>,
  /// Base for document URLs; the request's `Host` is used when unset.
  pub public_base_url: Option<String>,
  pub mapper:          MapperDefaults,
  /// Zone petitions are dated in; the host zone when unset.
  pub utc_offset:      Option<FixedOffset>,
}

/// Shared state threaded through all axum handlers.
pub struct AppState<S, R> {
  pub store:      Arc<S>,
  pub petitioner: Arc<Petitioner<S, R, FsArtifactStore>>,
  pub artifacts:  Arc<FsArtifactStore>,
  pub options:    Arc<ApiOptions>,
}

impl<S, R> Clone for AppState<S, R> {
  fn clone(&self) -> Self {
    Self {
      store:      self.store.clone(),
      petitioner: self.petitioner.clone(),
      artifacts:  self.artifacts.clone(),
      options:    self.options.clone(),
    }
  }
}

impl<S, R> AppState<S, R>
where
  S: CaseStore + 'static,
  R: Renderer + 'static,
{
  pub fn new(store: Arc<S>, renderer: Arc<R>, artifacts: FsArtifactStore, options: ApiOptions) -> Self {
    let artifacts = Arc::new(artifacts);
    let mut petitioner = Petitioner::new(store.clone(), renderer, artifacts.clone())
      .with_defaults(options.mapper.clone());
    if let Some(offset) = options.utc_offset {
      petitioner = petitioner.with_clock(move || Utc::now().with_timezone(&offset));
    }
    Self {
      store,
      petitioner: Arc::new(petitioner),
      artifacts,
      options: Arc::new(options),
    }
  }

  /// Base URL that stored document paths are resolved against.
  pub fn document_base(&self, headers: &HeaderMap) -> String {
    if let Some(base) = &self.options.public_base_url {
      return base.clone();
    }
    headers
      .get(header::HOST)
      .and_then(|h| h.to_str().ok())
      .map(|host| format!("http://{host}"))
      .unwrap_or_default()
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the complete application router for `state`.
pub fn router<S, R>(state: AppState<S, R>) -> Router
where
  S: DirectoryStore + 'static,
  R: Renderer + 'static,
{
  let api = api_router::<S, R>().route_layer(middleware::from_fn_with_state(
    state.options.auth.clone(),
    auth::require_auth,
  ));

  Router::new()
    .route("/health", get(health))
    .nest("/api", api)
    .nest_service("/uploads", ServeDir::new(state.artifacts.uploads_dir()))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Routes mounted under `/api`.
fn api_router<S, R>() -> Router<AppState<S, R>>
where
  S: DirectoryStore + 'static,
  R: Renderer + 'static,
{
  Router::new()
    // Cases
    .route("/cases", get(cases::list::<S, R>).post(cases::create::<S, R>))
    .route("/cases/by-filing-number", get(cases::by_filing_number::<S, R>))
    .route(
      "/cases/{id}",
      get(cases::get_one::<S, R>)
        .put(cases::update::<S, R>)
        .delete(cases::delete::<S, R>),
    )
    // Accused
    .route("/accused", get(accused::list::<S, R>).post(accused::create::<S, R>))
    .route("/accused/by-number/{no}", get(accused::by_number::<S, R>))
    .route(
      "/accused/{id}",
      get(accused::get_one::<S, R>)
        .put(accused::update::<S, R>)
        .delete(accused::delete::<S, R>),
    )
    // Complainants
    .route(
      "/complainants",
      get(complainants::list::<S, R>).post(complainants::create::<S, R>),
    )
    .route(
      "/complainants/{id}",
      get(complainants::get_one::<S, R>)
        .put(complainants::update::<S, R>)
        .delete(complainants::delete::<S, R>),
    )
    // Templates
    .route("/templates", get(templates::list::<S, R>))
    .route("/templates/by-code/{code}", get(templates::by_code::<S, R>))
    .route("/templates/{id}", get(templates::get_one::<S, R>))
    // Petitions
    .route("/petitions", get(petitions::list::<S, R>).post(petitions::create::<S, R>))
    .route(
      "/petitions/{id}",
      get(petitions::get_one::<S, R>)
        .put(petitions::update::<S, R>)
        .delete(petitions::delete::<S, R>),
    )
    // Firm directory
    .route("/law-firms", get(firms::list::<S, R>).post(firms::create::<S, R>))
    .route(
      "/law-firms/{id}",
      get(firms::get_one::<S, R>).delete(firms::delete::<S, R>),
    )
    .route("/advocates", get(advocates::list::<S, R>).post(advocates::create::<S, R>))
    .route(
      "/advocates/{id}",
      get(advocates::get_one::<S, R>)
        .put(advocates::update::<S, R>)
        .delete(advocates::delete::<S, R>),
    )
    .route("/advocates/{id}/activate", patch(advocates::activate::<S, R>))
    .route("/advocates/{id}/deactivate", patch(advocates::deactivate::<S, R>))
    .route("/admin/firms", get(firms::rosters::<S, R>))
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({
    "status":    "ok",
    "message":   "Server is running",
    "timestamp": Utc::now().to_rfc3339(),
  }))
}
