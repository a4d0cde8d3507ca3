use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use streetcode_media_server::audio::AudioService;
use streetcode_media_server::blob_store::FsBlobStore;
use streetcode_media_server::config::{AppConfig, CliConfig, FileConfig};
use streetcode_media_server::logging::TracingLog;
use streetcode_media_server::media_store::SqliteMediaStore;
use streetcode_media_server::server::run_server;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite metadata database file.
    #[clap(long)]
    pub db_path: Option<PathBuf>,

    /// Directory holding the content-addressed audio blobs.
    #[clap(long)]
    pub blob_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// Optional TOML config file; its values override the CLI.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let args = CliArgs::parse();

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli = CliConfig {
        db_path: args.db_path,
        blob_dir: args.blob_dir,
        port: args.port,
    };
    let config = AppConfig::resolve(&cli, file_config)?;

    let media_store = Arc::new(SqliteMediaStore::open(&config.db_path)?);

    let blob_store = Arc::new(FsBlobStore::new(&config.blob_dir));
    blob_store.init().await?;

    let audio_service = Arc::new(AudioService::new(
        media_store.clone(),
        media_store,
        blob_store,
        Arc::new(TracingLog),
    ));

    info!("Starting media server on port {}", config.port);
    run_server(audio_service, config.port).await
}
