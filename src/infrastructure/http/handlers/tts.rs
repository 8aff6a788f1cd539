//! TTS Handler - 文本合成

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// `/api/tts` 查询参数，三个都必须出现（可以为空）
#[derive(Debug, Deserialize)]
pub struct TtsQuery {
    pub text: String,
    pub speaker_id: String,
    pub style_wav: String,
}

pub async fn tts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TtsQuery>,
) -> Result<Response, ApiError> {
    let command = SynthesizeSpeech {
        text: query.text,
        speaker_id: query.speaker_id,
        style_wav: query.style_wav,
    };

    let result = state.synthesize_handler.handle(command).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
