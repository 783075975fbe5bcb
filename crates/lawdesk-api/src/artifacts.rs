//! File-system [`ArtifactStore`]: rendered petitions are written under
//! `<root>/uploads/petitions/` and served back through the `/uploads` mount.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use lawdesk_core::artifacts::ArtifactStore;
use thiserror::Error;

/// Directory under the artifacts root that is exposed at `/uploads`.
pub const UPLOADS_DIR: &str = "uploads";
const PETITIONS_DIR: &str = "petitions";

#[derive(Debug, Error)]
pub enum ArtifactError {
  #[error("refusing to store artifact under unsafe name {0:?}")]
  UnsafeName(String),

  #[error("artifact i/o error: {0}")]
  Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct FsArtifactStore {
  root: PathBuf,
}

impl FsArtifactStore {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  /// The directory served at `/uploads`.
  pub fn uploads_dir(&self) -> PathBuf { self.root.join(UPLOADS_DIR) }
}

/// A bare file name: no separators, no parent references.
fn is_safe_name(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && !name.contains(['/', '\\'])
    && !name.contains("..")
}

impl ArtifactStore for FsArtifactStore {
  type Error = ArtifactError;

  async fn save_petition(&self, file_name: &str, contents: Bytes) -> Result<String, ArtifactError> {
    if !is_safe_name(file_name) {
      return Err(ArtifactError::UnsafeName(file_name.to_owned()));
    }

    let dir = self.uploads_dir().join(PETITIONS_DIR);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(file_name), &contents).await?;

    let relative = format!("{UPLOADS_DIR}/{PETITIONS_DIR}/{file_name}");
    tracing::debug!(path = %relative, bytes = contents.len(), "stored petition document");
    Ok(relative)
  }
}
