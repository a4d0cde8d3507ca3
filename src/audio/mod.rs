//! Audio asset operations.

mod models;
mod service;

pub use models::{AudioView, CreateAudioRequest};
pub use service::AudioService;
