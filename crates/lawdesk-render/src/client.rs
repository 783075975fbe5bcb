//! [`RenderClient`]: the reqwest implementation of [`Renderer`].

use std::time::{Duration, Instant};

use bytes::Bytes;
use lawdesk_core::{
  mapper::TemplateData,
  render::{RenderFailure, Renderer},
  template::RenderCode,
};
use reqwest::Client;
use serde::Serialize;

use crate::{Error, Result};

/// Connection settings for the render service.
#[derive(Debug, Clone)]
pub struct RenderConfig {
  /// e.g. `http://localhost:8080`; the client appends `/api/templates/render`.
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080".into(),
      timeout:  Duration::from_secs(30),
    }
  }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
  template_id: RenderCode,
  form_data:   &'a TemplateData,
  format:      &'static str,
}

/// Async client for `POST /api/templates/render`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct RenderClient {
  client:   Client,
  endpoint: String,
}

impl RenderClient {
  pub fn new(config: RenderConfig) -> Result<Self> {
    let base = config.base_url.trim().trim_end_matches('/');
    if base.is_empty() {
      return Err(Error::MissingBaseUrl);
    }
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, endpoint: format!("{base}/api/templates/render") })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }
}

fn classify(e: reqwest::Error) -> RenderFailure {
  if e.is_timeout() {
    RenderFailure::Timeout
  } else {
    RenderFailure::Transport(e.to_string())
  }
}

impl Renderer for RenderClient {
  async fn render(&self, code: RenderCode, data: &TemplateData) -> Result<Bytes, RenderFailure> {
    let started = Instant::now();
    let resp = self
      .client
      .post(&self.endpoint)
      .json(&RenderRequest { template_id: code, form_data: data, format: "pdf" })
      .send()
      .await
      .map_err(classify)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(RenderFailure::Status(status.as_u16()));
    }

    let body = resp.bytes().await.map_err(|e| {
      if e.is_timeout() {
        RenderFailure::Timeout
      } else {
        RenderFailure::MalformedBody(e.to_string())
      }
    })?;
    if body.is_empty() {
      return Err(RenderFailure::MalformedBody("empty body".into()));
    }

    tracing::debug!(
      render_code = %code,
      bytes = body.len(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "render service returned document"
    );
    Ok(body)
  }
}
