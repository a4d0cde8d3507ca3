use crate::audio::AudioService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ServerState {
    pub audio_service: Arc<AudioService>,
}
