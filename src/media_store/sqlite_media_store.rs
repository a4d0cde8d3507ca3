//! SQLite-backed metadata registry.

use super::schema::MEDIA_VERSIONED_SCHEMAS;
use super::{AudioRecord, AudioStore, NewAudio, StreetcodeRecord, StreetcodeStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

const AUDIO_COLUMNS: &str = "id, title, mime_type, blob_name, description";

/// Unit-of-work store over a single SQLite connection.
///
/// The first staged write opens a transaction; `commit` ends it and reports
/// how many rows it affected. Reads on the same store observe staged writes.
#[derive(Clone)]
pub struct SqliteMediaStore {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    conn: Connection,
    in_tx: bool,
    staged_changes: usize,
}

impl SqliteMediaStore {
    pub fn new(conn: Connection) -> Result<Self> {
        let schema = MEDIA_VERSIONED_SCHEMAS.first().unwrap();
        conn.execute_batch(schema.up)
            .context("Failed to initialize media schema")?;
        conn.execute("PRAGMA foreign_keys = ON;", [])?;
        conn.execute(&format!("PRAGMA user_version = {}", schema.version), [])?;

        Ok(Self {
            inner: Arc::new(Mutex::new(StoreInner {
                conn,
                in_tx: false,
                staged_changes: 0,
            })),
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open media database {}", path.display()))?;
        Self::new(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Inserts a streetcode row, optionally linked to an audio record.
    /// Streetcode authoring sits outside the audio operations; this is the
    /// seam used by imports and tests.
    pub fn insert_streetcode(&self, title: &str, audio_id: Option<i64>) -> Result<i64> {
        let inner = self.inner.lock().unwrap();
        inner.conn.execute(
            "INSERT INTO streetcodes (title, audio_id) VALUES (?1, ?2)",
            params![title, audio_id],
        )?;
        Ok(inner.conn.last_insert_rowid())
    }
}

fn begin_if_needed(inner: &mut StoreInner) -> Result<()> {
    if !inner.in_tx {
        inner.conn.execute_batch("BEGIN IMMEDIATE;")?;
        inner.in_tx = true;
    }
    Ok(())
}

fn audio_from_row(row: &Row<'_>) -> rusqlite::Result<AudioRecord> {
    Ok(AudioRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        mime_type: row.get(2)?,
        blob_name: row.get(3)?,
        description: row.get(4)?,
    })
}

#[async_trait]
impl AudioStore for SqliteMediaStore {
    async fn create(&self, audio: NewAudio) -> Result<AudioRecord> {
        let mut inner = self.inner.lock().unwrap();
        begin_if_needed(&mut inner)?;

        let changed = inner.conn.execute(
            "INSERT INTO audios (title, mime_type, blob_name, description)
             VALUES (?1, ?2, ?3, ?4)",
            params![audio.title, audio.mime_type, audio.blob_name, audio.description],
        )?;
        inner.staged_changes += changed;

        Ok(AudioRecord {
            id: inner.conn.last_insert_rowid(),
            title: audio.title,
            mime_type: audio.mime_type,
            blob_name: audio.blob_name,
            description: audio.description,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AudioRecord>> {
        let inner = self.inner.lock().unwrap();
        let audio = inner
            .conn
            .query_row(
                &format!("SELECT {} FROM audios WHERE id = ?1", AUDIO_COLUMNS),
                params![id],
                audio_from_row,
            )
            .optional()?;
        Ok(audio)
    }

    async fn find_all(&self) -> Result<Option<Vec<AudioRecord>>> {
        let inner = self.inner.lock().unwrap();
        let mut stmt = inner
            .conn
            .prepare(&format!("SELECT {} FROM audios ORDER BY id", AUDIO_COLUMNS))?;
        let audios = stmt
            .query_map([], audio_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(audios))
    }

    async fn delete(&self, audio: &AudioRecord) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        begin_if_needed(&mut inner)?;

        let changed = inner
            .conn
            .execute("DELETE FROM audios WHERE id = ?1", params![audio.id])?;
        inner.staged_changes += changed;
        Ok(())
    }

    async fn commit(&self) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if inner.in_tx {
            inner.conn.execute_batch("COMMIT;")?;
            inner.in_tx = false;
        }
        let committed = inner.staged_changes;
        inner.staged_changes = 0;
        Ok(committed)
    }
}

#[async_trait]
impl StreetcodeStore for SqliteMediaStore {
    async fn find_streetcode(
        &self,
        id: i64,
        include_audio: bool,
    ) -> Result<Option<StreetcodeRecord>> {
        let inner = self.inner.lock().unwrap();
        let row = inner
            .conn
            .query_row(
                "SELECT id, title, audio_id FROM streetcodes WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<i64>>(2)?,
                    ))
                },
            )
            .optional()?;

        let (id, title, audio_id) = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let audio = match (include_audio, audio_id) {
            (true, Some(audio_id)) => inner
                .conn
                .query_row(
                    &format!("SELECT {} FROM audios WHERE id = ?1", AUDIO_COLUMNS),
                    params![audio_id],
                    audio_from_row,
                )
                .optional()?,
            _ => None,
        };

        Ok(Some(StreetcodeRecord { id, title, audio }))
    }
}
