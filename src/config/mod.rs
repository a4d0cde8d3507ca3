mod file_config;

pub use file_config::FileConfig;

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

/// CLI arguments subject to file-config override.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub blob_dir: Option<PathBuf>,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub blob_dir: PathBuf,
    pub port: u16,
}

impl AppConfig {
    /// Resolves configuration from CLI arguments and an optional TOML file.
    /// File values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| anyhow!("db_path must be specified via --db-path or in the config file"))?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let blob_dir = file
            .blob_dir
            .map(PathBuf::from)
            .or_else(|| cli.blob_dir.clone())
            .ok_or_else(|| {
                anyhow!("blob_dir must be specified via --blob-dir or in the config file")
            })?;

        let port = file.port.unwrap_or(cli.port);

        Ok(AppConfig {
            db_path,
            blob_dir,
            port,
        })
    }
}
