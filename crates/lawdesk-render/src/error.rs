//! Error type for `lawdesk-render`.

use thiserror::Error;

/// Construction-time errors. Per-call failures are
/// [`RenderFailure`](lawdesk_core::render::RenderFailure)s instead.
#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[from] reqwest::Error),

  #[error("render service base URL is empty")]
  MissingBaseUrl,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
