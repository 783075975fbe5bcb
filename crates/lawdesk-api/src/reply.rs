//! Success envelope shared by every JSON endpoint.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{"success": true, "data": ..., "count"?: n, "message"?: "..."}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  success: bool,
  data:    T,
  #[serde(skip_serializing_if = "Option::is_none")]
  count:   Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
  pub fn new(data: T) -> Self {
    Self { success: true, data, count: None, message: None }
  }

  pub fn message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }
}

impl<T: Serialize> Envelope<Vec<T>> {
  /// A listing; `count` is the number of items.
  pub fn list(items: Vec<T>) -> Self {
    let count = items.len();
    Self { count: Some(count), ..Self::new(items) }
  }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
  fn into_response(self) -> Response { Json(self).into_response() }
}
