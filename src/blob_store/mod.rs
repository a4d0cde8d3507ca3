//! Content-addressable storage for audio payloads.

mod fs_store;

pub use fs_store::{BlobStoreError, FsBlobStore};

use anyhow::Result;
use async_trait::async_trait;
use std::pin::Pin;
use tokio::io::AsyncRead;

/// An owned byte stream over a stored payload. The caller owns the stream
/// and releases the underlying handle by dropping it.
pub type BlobStream = Pin<Box<dyn AsyncRead + Send>>;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persists a base64-encoded payload and returns its storage name,
    /// `{sha256_hex}.{extension}`. Saving identical payload + extension
    /// twice yields the same name without duplicating storage.
    async fn save(&self, encoded_payload: &str, title: &str, extension: &str) -> Result<String>;

    /// Returns the stored payload re-encoded as base64.
    async fn read_encoded(&self, blob_name: &str) -> Result<String>;

    /// Returns the stored payload as a raw byte stream.
    async fn read_stream(&self, blob_name: &str) -> Result<BlobStream>;

    /// Removes the payload. Deleting a name that is already absent is Ok.
    async fn delete(&self, blob_name: &str) -> Result<()>;
}
