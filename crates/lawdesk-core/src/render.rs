//! The `Renderer` trait, the boundary to the external template render service.

use std::future::Future;

use bytes::Bytes;
use thiserror::Error;

use crate::{mapper::TemplateData, template::RenderCode};

/// Why a render attempt produced no document.
///
/// Render failures are recovered by the orchestrator; they are logged and
/// the petition is filed without a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderFailure {
  #[error("render service timed out")]
  Timeout,

  #[error("render service responded with status {0}")]
  Status(u16),

  #[error("render service unreachable: {0}")]
  Transport(String),

  #[error("render service returned an unusable body: {0}")]
  MalformedBody(String),
}

/// Abstraction over the external render service.
///
/// Implementations make exactly one attempt per call and never surface an
/// error type other than [`RenderFailure`].
pub trait Renderer: Send + Sync {
  /// Render `data` with the layout identified by `code`; returns the PDF.
  fn render<'a>(
    &'a self,
    code: RenderCode,
    data: &'a TemplateData,
  ) -> impl Future<Output = Result<Bytes, RenderFailure>> + Send + 'a;
}
