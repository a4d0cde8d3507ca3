//! Schema definition for the media metadata tables.

pub struct MediaSchema {
    pub version: usize,
    pub up: &'static str,
}

pub const MEDIA_VERSIONED_SCHEMAS: &[MediaSchema] = &[MediaSchema {
    version: 1,
    up: r#"
            CREATE TABLE IF NOT EXISTS audios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                mime_type TEXT NOT NULL,
                blob_name TEXT NOT NULL,
                description TEXT
            );

            CREATE TABLE IF NOT EXISTS streetcodes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                audio_id INTEGER REFERENCES audios(id) ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_audios_blob_name ON audios(blob_name);
            CREATE INDEX IF NOT EXISTS idx_streetcodes_audio_id ON streetcodes(audio_id);
        "#,
}];
