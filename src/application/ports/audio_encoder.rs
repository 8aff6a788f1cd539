//! Audio Encoder Port - 波形序列化
//!
//! 将合成得到的波形写入标准音频容器

use thiserror::Error;

use crate::domain::Waveform;

/// 编解码错误
#[derive(Debug, Error)]
pub enum AudioCodecError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// 编码后的音频
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    pub data: Vec<u8>,
    pub content_type: &'static str,
}

/// Audio Encoder Port
pub trait AudioEncoderPort: Send + Sync {
    fn encode(&self, waveform: &Waveform) -> Result<EncodedAudio, AudioCodecError>;
}
