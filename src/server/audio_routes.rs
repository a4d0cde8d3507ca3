//! HTTP routes for the audio operations.
//!
//! The routes only translate outcomes to responses; the service owns the
//! log-then-return discipline for modeled failures.

use super::state::ServerState;
use crate::audio::CreateAudioRequest;
use crate::outcome::Outcome;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio_util::io::ReaderStream;
use tracing::error;

pub fn make_audio_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/audios", get(get_all_audios).post(create_audio))
        .route("/api/audios/{id}", get(get_audio_by_id).delete(delete_audio))
        .route("/api/audios/{id}/raw", get(get_audio_raw))
        .route("/api/streetcodes/{id}/audio", get(get_audio_by_streetcode_id))
}

fn failure_response(status: StatusCode, errors: &[String]) -> Response {
    (status, Json(json!({ "errors": errors }))).into_response()
}

fn internal_error(err: anyhow::Error) -> Response {
    error!("Audio operation failed: {:#}", err);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn create_audio(
    State(state): State<ServerState>,
    Json(request): Json<CreateAudioRequest>,
) -> Response {
    match state.audio_service.create(request).await {
        Ok(Outcome::Success(view)) => Json(view).into_response(),
        Ok(outcome) => failure_response(StatusCode::BAD_REQUEST, outcome.errors()),
        Err(err) => internal_error(err),
    }
}

async fn delete_audio(State(state): State<ServerState>, Path(id): Path<i64>) -> Response {
    match state.audio_service.delete(id).await {
        Ok(Outcome::Success(())) => StatusCode::OK.into_response(),
        Ok(outcome) => failure_response(StatusCode::BAD_REQUEST, outcome.errors()),
        Err(err) => internal_error(err),
    }
}

async fn get_all_audios(State(state): State<ServerState>) -> Response {
    match state.audio_service.get_all().await {
        Ok(Outcome::Success(views)) => Json(views).into_response(),
        Ok(outcome) => failure_response(StatusCode::NOT_FOUND, outcome.errors()),
        Err(err) => internal_error(err),
    }
}

async fn get_audio_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> Response {
    match state.audio_service.get_by_id(id).await {
        Ok(Outcome::Success(view)) => Json(view).into_response(),
        Ok(outcome) => failure_response(StatusCode::NOT_FOUND, outcome.errors()),
        Err(err) => internal_error(err),
    }
}

async fn get_audio_raw(State(state): State<ServerState>, Path(id): Path<i64>) -> Response {
    match state.audio_service.get_raw(id).await {
        Ok(Outcome::Success(stream)) => {
            let body = Body::from_stream(ReaderStream::new(stream));
            (
                [(header::CONTENT_TYPE, "application/octet-stream")],
                body,
            )
                .into_response()
        }
        Ok(outcome) => failure_response(StatusCode::NOT_FOUND, outcome.errors()),
        Err(err) => internal_error(err),
    }
}

async fn get_audio_by_streetcode_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Response {
    match state.audio_service.get_by_streetcode_id(id).await {
        Ok(Outcome::Success(view)) => Json(view).into_response(),
        Ok(Outcome::NoContent) => StatusCode::NO_CONTENT.into_response(),
        Ok(outcome) => failure_response(StatusCode::NOT_FOUND, outcome.errors()),
        Err(err) => internal_error(err),
    }
}
