//! Free-form answer sets submitted by the client for a template.
//!
//! The client app sends whatever keys the template's questions define, plus a
//! few structural keys (`selected_accused_ids`, `petition_points`, …). Values
//! are mostly strings but numbers and arrays show up too, so accessors are
//! lenient: a key counts as present when it holds a non-empty string or a
//! number.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(Map<String, Value>);

impl Answers {
  pub fn new(map: Map<String, Value>) -> Self { Self(map) }

  pub fn as_map(&self) -> &Map<String, Value> { &self.0 }

  pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

  /// The value at `key` as text, if it is a non-empty string or a number.
  pub fn text(&self, key: &str) -> Option<String> {
    match self.0.get(key)? {
      Value::String(s) if !s.is_empty() => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      _ => None,
    }
  }

  /// [`Answers::text`] with a fallback.
  pub fn text_or(&self, key: &str, default: &str) -> String {
    self.text(key).unwrap_or_else(|| default.to_owned())
  }

  /// The value at `key` as a list of strings; non-string entries become
  /// empty strings so positions are preserved. `None` unless it is an array.
  pub fn list(&self, key: &str) -> Option<Vec<String>> {
    match self.0.get(key)? {
      Value::Array(items) => Some(
        items
          .iter()
          .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
          })
          .collect(),
      ),
      _ => None,
    }
  }

  /// The value at `key` as a count. A present but unparsable value counts as
  /// zero; an absent or empty one is `None`.
  pub fn count(&self, key: &str) -> Option<usize> {
    let raw = self.text(key)?;
    Some(
      raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0),
    )
  }
}

impl From<Map<String, Value>> for Answers {
  fn from(map: Map<String, Value>) -> Self { Self(map) }
}
