//! The `ArtifactStore` trait: durable storage for generated documents.

use std::future::Future;

use bytes::Bytes;

/// Durable storage for rendered documents.
///
/// Implementations return the path of the stored document relative to the
/// artifacts root; that relative path is what gets persisted and what the
/// retrieval URL is built from.
pub trait ArtifactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store a petition document under `file_name` and return its relative path.
  fn save_petition<'a>(
    &'a self,
    file_name: &'a str,
    contents: Bytes,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
