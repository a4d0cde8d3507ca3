//! Server assembly and startup.

use super::audio_routes::make_audio_routes;
use super::state::ServerState;
use crate::audio::AudioService;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub async fn run_server(audio_service: Arc<AudioService>, port: u16) -> Result<()> {
    let state = ServerState { audio_service };
    let app = make_audio_routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
