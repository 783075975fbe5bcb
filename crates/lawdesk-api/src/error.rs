//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use lawdesk_core::{
  orchestrator::PetitionError,
  store::{Classify, ErrorClass},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Rendered as `{"success": false, "error": ..., "details": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("{message}")]
  Internal {
    message: String,
    details: Option<String>,
  },
}

impl ApiError {
  /// Map a backend error by its [`ErrorClass`].
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match e.class() {
      ErrorClass::Invalid => ApiError::BadRequest(e.to_string()),
      ErrorClass::Conflict => ApiError::Conflict(e.to_string()),
      ErrorClass::MissingParent => ApiError::NotFound(e.to_string()),
      ErrorClass::Internal => ApiError::Store(Box::new(e)),
    }
  }

  pub fn not_found(what: &str, id: &str) -> Self {
    ApiError::NotFound(format!("{what} {id} not found"))
  }
}

/// A body that is not JSON, or does not fit the expected shape, is a client
/// error answered with the usual envelope rather than axum's plain text.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
  }
}

impl<E> From<PetitionError<E>> for ApiError
where
  E: std::error::Error + Classify + Send + Sync + 'static,
{
  fn from(e: PetitionError<E>) -> Self {
    match e {
      PetitionError::Validation(m) => ApiError::BadRequest(m),
      PetitionError::CaseNotFound(_) => ApiError::NotFound("Case not found".into()),
      PetitionError::TemplateNotFound(_) => ApiError::NotFound("Template not found".into()),
      PetitionError::Store(e) => ApiError::from_store(e),
      e @ PetitionError::Dependency { .. } => ApiError::Internal {
        message: "Failed to create petition: no complainant available".into(),
        details: Some(e.to_string()),
      },
      PetitionError::Persistence(source) => ApiError::Internal {
        message: "Failed to create petition record".into(),
        details: Some(source.to_string()),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message, details) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m, None),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m, None),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m, None),
      ApiError::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "success": false, "error": "Unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"lawdesk\""),
        );
        return res;
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned(), Some(e.to_string()))
      }
      ApiError::Internal { message, details } => {
        tracing::error!(%message, details = details.as_deref().unwrap_or(""), "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, message, details)
      }
    };

    let body = match details {
      Some(details) => json!({ "success": false, "error": message, "details": details }),
      None => json!({ "success": false, "error": message }),
    };
    (status, Json(body)).into_response()
  }
}
