//! Filesystem-backed blob store.
//!
//! Payloads are stored in a flat directory under their content-derived name.
//! Writes go through a unique temp file and an atomic rename, so concurrent
//! saves of the same content never expose a half-written blob.

use super::{BlobStream, BlobStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// Errors for inputs the store rejects before touching the filesystem.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Invalid blob name: {0}")]
    InvalidBlobName(String),

    #[error("Invalid extension: {0}")]
    InvalidExtension(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

const MAX_EXTENSION_LEN: usize = 16;

pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the storage directory.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.with_context(|| {
            format!("Failed to create blob directory {}", self.root.display())
        })
    }

    fn blob_path(&self, blob_name: &str) -> Result<PathBuf, BlobStoreError> {
        validate_blob_name(blob_name)?;
        Ok(self.root.join(blob_name))
    }
}

fn validate_extension(extension: &str) -> Result<(), BlobStoreError> {
    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(BlobStoreError::InvalidExtension(extension.to_string()))
    }
}

/// Blob names are single path components produced by `save`; anything else
/// (path separators, leading dots, empty names) is rejected.
fn validate_blob_name(name: &str) -> Result<(), BlobStoreError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(BlobStoreError::InvalidBlobName(name.to_string()))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn save(&self, encoded_payload: &str, title: &str, extension: &str) -> Result<String> {
        validate_extension(extension)?;
        let payload = BASE64
            .decode(encoded_payload)
            .map_err(BlobStoreError::InvalidPayload)?;

        let blob_name = format!("{:x}.{}", Sha256::digest(&payload), extension);
        let path = self.root.join(&blob_name);

        match fs::metadata(&path).await {
            Ok(_) => {
                debug!("Blob {} already stored, skipping write for '{}'", blob_name, title);
                return Ok(blob_name);
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to stat blob {}", blob_name))
            }
        }

        let tmp_path = self.root.join(format!(".tmp-{}", Uuid::new_v4()));
        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("Failed to create temp file for blob {}", blob_name))?;
        file.write_all(&payload).await?;
        file.flush().await?;
        drop(file);

        fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to store blob {}", blob_name))?;

        debug!(
            "Stored blob {} ({} bytes) for '{}'",
            blob_name,
            payload.len(),
            title
        );
        Ok(blob_name)
    }

    async fn read_encoded(&self, blob_name: &str) -> Result<String> {
        let path = self.blob_path(blob_name)?;
        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("Failed to read blob {}", blob_name))?;
        Ok(BASE64.encode(bytes))
    }

    async fn read_stream(&self, blob_name: &str) -> Result<BlobStream> {
        let path = self.blob_path(blob_name)?;
        let file = fs::File::open(&path)
            .await
            .with_context(|| format!("Failed to open blob {}", blob_name))?;
        Ok(Box::pin(file))
    }

    async fn delete(&self, blob_name: &str) -> Result<()> {
        let path = self.blob_path(blob_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to delete blob {}", blob_name)),
        }
    }
}
