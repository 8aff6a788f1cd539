//! Synthesize Command - 文本合成

use std::sync::Arc;
use std::time::Instant;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioEncoderPort, SynthesisEngine};
use crate::domain::{StyleReference, SynthesisRequest};

/// 合成命令（对应 `/api/tts` 的查询参数）
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    /// 空字符串表示未指定
    pub speaker_id: String,
    /// 空字符串表示未指定
    pub style_wav: String,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    pub sample_rate: u32,
    pub duration_ms: u64,
}

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    engine: Arc<dyn SynthesisEngine>,
    encoder: Arc<dyn AudioEncoderPort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(engine: Arc<dyn SynthesisEngine>, encoder: Arc<dyn AudioEncoderPort>) -> Self {
        Self { engine, encoder }
    }

    /// 将命令转换为合成请求
    ///
    /// 说话人只对多说话人模型生效
    fn build_request(&self, command: SynthesizeSpeech) -> Result<SynthesisRequest, ApplicationError> {
        let style = StyleReference::from_uri(&command.style_wav)?;

        let mut request = SynthesisRequest::new(command.text);
        if self.engine.supports_multi_speaker() && !command.speaker_id.is_empty() {
            request = request.with_speaker(command.speaker_id);
        }
        if let Some(style) = style {
            request = request.with_style(style);
        }
        Ok(request)
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        let request = self.build_request(command)?;

        tracing::info!(
            text = %request.text,
            speaker_id = ?request.speaker_id,
            style = ?request.style,
            "Model input"
        );

        let started = Instant::now();
        let engine = self.engine.clone();
        let waveform = tokio::task::spawn_blocking(move || engine.synthesize(&request))
            .await
            .map_err(|e| ApplicationError::internal(format!("Synthesis task failed: {}", e)))??;

        let encoded = self.encoder.encode(&waveform)?;

        tracing::info!(
            duration_ms = waveform.duration_ms(),
            sample_rate = waveform.sample_rate,
            audio_size = encoded.data.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Synthesis completed"
        );

        Ok(SynthesizeSpeechResponse {
            duration_ms: waveform.duration_ms(),
            sample_rate: waveform.sample_rate,
            content_type: encoded.content_type,
            audio_data: encoded.data,
        })
    }
}
