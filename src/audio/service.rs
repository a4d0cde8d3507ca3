//! The six audio asset operations.
//!
//! Each operation composes the metadata registry and the blob store into one
//! user-visible action behind a single commit boundary. Modeled failures
//! (missing rows, zero-row commits, an absent collection) are mirrored to
//! the operation log with the exact message carried in the returned outcome;
//! infrastructure faults propagate as errors instead.

use super::models::{AudioView, CreateAudioRequest};
use crate::blob_store::{BlobStore, BlobStream};
use crate::logging::OperationLog;
use crate::media_store::{AudioStore, NewAudio, StreetcodeStore};
use crate::outcome::Outcome;
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

pub struct AudioService {
    audio_store: Arc<dyn AudioStore>,
    streetcode_store: Arc<dyn StreetcodeStore>,
    blob_store: Arc<dyn BlobStore>,
    log: Arc<dyn OperationLog>,
}

impl AudioService {
    pub fn new(
        audio_store: Arc<dyn AudioStore>,
        streetcode_store: Arc<dyn StreetcodeStore>,
        blob_store: Arc<dyn BlobStore>,
        log: Arc<dyn OperationLog>,
    ) -> Self {
        Self {
            audio_store,
            streetcode_store,
            blob_store,
            log,
        }
    }

    fn fail<T>(&self, message: String) -> Outcome<T> {
        self.log.error(&message);
        Outcome::Failure(vec![message])
    }

    /// Stores the payload, then persists the metadata row carrying the
    /// content-derived blob name. The blob write always precedes the row.
    pub async fn create(&self, request: CreateAudioRequest) -> Result<Outcome<AudioView>> {
        let blob_name = self
            .blob_store
            .save(&request.encoded_payload, &request.title, &request.extension)
            .await?;

        let record = self
            .audio_store
            .create(NewAudio {
                title: request.title,
                mime_type: request.mime_type,
                blob_name,
                description: request.description,
            })
            .await?;

        if self.audio_store.commit().await? == 0 {
            return Ok(self.fail("Failed to create an audio".to_string()));
        }

        Ok(Outcome::Success(AudioView::from(&record)))
    }

    pub async fn delete(&self, id: i64) -> Result<Outcome<()>> {
        let audio = match self.audio_store.find_by_id(id).await? {
            Some(audio) => audio,
            None => {
                return Ok(self.fail(format!(
                    "Cannot find an audio with corresponding categoryId: {}",
                    id
                )))
            }
        };

        self.audio_store.delete(&audio).await?;

        // Blob removal is best effort; the stored file is unreachable once
        // the metadata row is gone.
        if let Err(err) = self.blob_store.delete(&audio.blob_name).await {
            warn!("Failed to delete blob {}: {:#}", audio.blob_name, err);
        }

        if self.audio_store.commit().await? == 0 {
            return Ok(self.fail("Failed to delete an audio".to_string()));
        }

        self.log.info("DeleteAudioCommand handled successfully");
        Ok(Outcome::Success(()))
    }

    /// Lists every stored asset, resolving each payload from the blob store.
    /// A failing payload read fails the whole operation; a registered row
    /// without its blob is corruption, not a degraded-but-valid state.
    pub async fn get_all(&self) -> Result<Outcome<Vec<AudioView>>> {
        let audios = match self.audio_store.find_all().await? {
            Some(audios) => audios,
            None => return Ok(self.fail("Cannot find any audios".to_string())),
        };

        let mut views = Vec::with_capacity(audios.len());
        for record in &audios {
            let mut view = AudioView::from(record);
            view.payload = Some(self.blob_store.read_encoded(&record.blob_name).await?);
            views.push(view);
        }

        Ok(Outcome::Success(views))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Outcome<AudioView>> {
        let record = match self.audio_store.find_by_id(id).await? {
            Some(record) => record,
            None => {
                return Ok(self.fail(format!(
                    "Cannot find an audio with corresponding id: {}",
                    id
                )))
            }
        };

        let mut view = AudioView::from(&record);
        view.payload = Some(self.blob_store.read_encoded(&record.blob_name).await?);
        Ok(Outcome::Success(view))
    }

    /// The one read path that skips DTO mapping and encoding: the caller
    /// receives the stored bytes as a stream it owns.
    pub async fn get_raw(&self, id: i64) -> Result<Outcome<BlobStream>> {
        let record = match self.audio_store.find_by_id(id).await? {
            Some(record) => record,
            None => {
                return Ok(self.fail(format!(
                    "Cannot find an audio with corresponding id: {}",
                    id
                )))
            }
        };

        let stream = self.blob_store.read_stream(&record.blob_name).await?;
        Ok(Outcome::Success(stream))
    }

    /// A streetcode that exists but has no audio attached is a valid state,
    /// reported as `NoContent` rather than a failure.
    pub async fn get_by_streetcode_id(&self, streetcode_id: i64) -> Result<Outcome<AudioView>> {
        let streetcode = match self
            .streetcode_store
            .find_streetcode(streetcode_id, true)
            .await?
        {
            Some(streetcode) => streetcode,
            None => {
                return Ok(self.fail(format!(
                    "Cannot find an audio with the corresponding streetcode id: {}",
                    streetcode_id
                )))
            }
        };

        let record = match streetcode.audio {
            Some(record) => record,
            None => return Ok(Outcome::NoContent),
        };

        let mut view = AudioView::from(&record);
        view.payload = Some(self.blob_store.read_encoded(&record.blob_name).await?);
        Ok(Outcome::Success(view))
    }
}
