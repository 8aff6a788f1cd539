//! Synthesis Context - Value Objects

use super::StyleReference;

/// 合成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 说话人 ID（仅多说话人模型使用）
    pub speaker_id: Option<String>,
    /// 风格参考
    pub style: Option<StyleReference>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker_id: None,
            style: None,
        }
    }

    pub fn with_speaker(mut self, speaker_id: impl Into<String>) -> Self {
        self.speaker_id = Some(speaker_id.into());
        self
    }

    pub fn with_style(mut self, style: StyleReference) -> Self {
        self.style = Some(style);
        self
    }
}

/// 合成结果：单声道波形
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// 归一化到 [-1.0, 1.0] 的采样
    pub samples: Vec<f32>,
    /// 采样率
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }
}
