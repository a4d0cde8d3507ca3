//! Request and view types for the audio operations.

use crate::media_store::AudioRecord;
use serde::{Deserialize, Serialize};

/// Input for creating an audio asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAudioRequest {
    pub title: String,
    pub description: Option<String>,
    pub mime_type: String,
    /// Base64-encoded audio bytes.
    pub encoded_payload: String,
    /// Original file extension, without the leading dot.
    pub extension: String,
}

/// Caller-facing representation of a stored audio asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioView {
    pub id: i64,
    pub title: String,
    pub mime_type: String,
    pub blob_name: String,
    /// Base64 payload. Populated by the read operations, always sourced
    /// from the blob store rather than the database.
    pub payload: Option<String>,
}

impl From<&AudioRecord> for AudioView {
    fn from(record: &AudioRecord) -> Self {
        AudioView {
            id: record.id,
            title: record.title.clone(),
            mime_type: record.mime_type.clone(),
            blob_name: record.blob_name.clone(),
            payload: None,
        }
    }
}
