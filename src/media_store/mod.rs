//! Metadata registry for audio assets and their parent streetcodes.

mod models;
mod schema;
mod sqlite_media_store;

pub use models::{AudioRecord, NewAudio, StreetcodeRecord};
pub use schema::{MediaSchema, MEDIA_VERSIONED_SCHEMAS};
pub use sqlite_media_store::SqliteMediaStore;

use anyhow::Result;
use async_trait::async_trait;

/// Registry of audio metadata rows.
///
/// Writes are staged inside a unit of work; nothing is visible to other
/// readers until `commit` completes with a non-zero affected-row count.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Stages an insert and returns the record with its assigned id.
    async fn create(&self, audio: NewAudio) -> Result<AudioRecord>;

    /// Returns Ok(None) if no row matches the id.
    async fn find_by_id(&self, id: i64) -> Result<Option<AudioRecord>>;

    /// Returns all audio rows in registry order. An absent collection is
    /// distinct from an empty one.
    async fn find_all(&self) -> Result<Option<Vec<AudioRecord>>>;

    /// Stages a delete of the given record.
    async fn delete(&self, audio: &AudioRecord) -> Result<()>;

    /// Ends the unit of work and returns the number of rows affected since
    /// the previous commit. Zero means nothing was persisted or removed.
    async fn commit(&self) -> Result<usize>;
}

/// Lookup of parent streetcode rows.
#[async_trait]
pub trait StreetcodeStore: Send + Sync {
    /// Returns the streetcode, populating its linked audio record when
    /// `include_audio` is set. Returns Ok(None) if no row matches the id.
    async fn find_streetcode(
        &self,
        id: i64,
        include_audio: bool,
    ) -> Result<Option<StreetcodeRecord>>;
}
