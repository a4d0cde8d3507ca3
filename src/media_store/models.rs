//! Persisted media metadata models.

/// A stored audio asset's metadata row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRecord {
    pub id: i64,
    pub title: String,
    pub mime_type: String,
    /// Content-derived storage name, `{sha256_hex}.{extension}`.
    pub blob_name: String,
    pub description: Option<String>,
}

/// Field set for a not-yet-persisted audio row; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAudio {
    pub title: String,
    pub mime_type: String,
    pub blob_name: String,
    pub description: Option<String>,
}

/// A streetcode row, optionally carrying its linked audio record.
#[derive(Debug, Clone)]
pub struct StreetcodeRecord {
    pub id: i64,
    pub title: String,
    pub audio: Option<AudioRecord>,
}
