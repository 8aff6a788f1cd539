//! Fake Synthesizer - 用于测试和演示的合成引擎
//!
//! 不调用任何运行时，按文本长度生成一段确定的正弦音

use std::f32::consts::PI;
use std::sync::Arc;

use super::ModelProfile;
use crate::application::ports::{SynthesisEngine, SynthesisError};
use crate::config::RuntimeConfig;
use crate::domain::{SynthesisRequest, Waveform};

/// Fake Synthesizer 配置
#[derive(Debug, Clone)]
pub struct FakeSynthesizerConfig {
    pub sample_rate: u32,
    /// 每个字符对应的时长（毫秒）
    pub ms_per_char: u32,
    pub frequency_hz: f32,
    pub speaker_ids: Vec<String>,
    pub use_gst: bool,
}

impl Default for FakeSynthesizerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            ms_per_char: 60,
            frequency_hz: 220.0,
            speaker_ids: Vec::new(),
            use_gst: false,
        }
    }
}

/// Fake Synthesizer
pub struct FakeSynthesizer {
    config: FakeSynthesizerConfig,
}

impl FakeSynthesizer {
    pub fn new(config: FakeSynthesizerConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            speakers = config.speaker_ids.len(),
            use_gst = config.use_gst,
            "FakeSynthesizer initialized"
        );
        Self { config }
    }

    /// 使用模型配置中的能力信息创建，保证页面与真实模型一致
    pub fn from_runtime(runtime: &Arc<RuntimeConfig>) -> Result<Self, SynthesisError> {
        let profile = ModelProfile::load(runtime)?;
        let speaker_ids = if profile.is_multi_speaker() && profile.speaker_ids.is_empty() {
            (0..profile.num_speakers).map(|i| i.to_string()).collect()
        } else {
            profile.speaker_ids
        };

        Ok(Self::new(FakeSynthesizerConfig {
            sample_rate: profile.sample_rate,
            speaker_ids,
            use_gst: profile.use_gst,
            ..FakeSynthesizerConfig::default()
        }))
    }
}

impl Default for FakeSynthesizer {
    fn default() -> Self {
        Self::new(FakeSynthesizerConfig::default())
    }
}

impl SynthesisEngine for FakeSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Waveform, SynthesisError> {
        if let Some(speaker) = &request.speaker_id {
            if !self.config.speaker_ids.contains(speaker) {
                return Err(SynthesisError::UnknownSpeaker(speaker.clone()));
            }
        }

        let chars = request.text.chars().count().max(1) as u64;
        let total = chars * self.config.ms_per_char as u64 * self.config.sample_rate as u64 / 1000;
        let rate = self.config.sample_rate as f32;

        let samples = (0..total)
            .map(|i| 0.3 * (2.0 * PI * self.config.frequency_hz * i as f32 / rate).sin())
            .collect();

        tracing::debug!(text_len = request.text.len(), samples = total, "FakeSynthesizer: generated tone");

        Ok(Waveform::new(samples, self.config.sample_rate))
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    fn supports_multi_speaker(&self) -> bool {
        !self.config.speaker_ids.is_empty()
    }

    fn speaker_ids(&self) -> Vec<String> {
        self.config.speaker_ids.clone()
    }

    fn supports_style_tokens(&self) -> bool {
        self.config.use_gst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_follows_text() {
        let engine = FakeSynthesizer::default();

        let short = engine.synthesize(&SynthesisRequest::new("hi")).unwrap();
        let long = engine.synthesize(&SynthesisRequest::new("hello there")).unwrap();

        assert_eq!(short.sample_rate, 22050);
        assert!(long.samples.len() > short.samples.len());
        assert!(short.samples.iter().all(|s| s.abs() <= 0.3 + f32::EPSILON));
    }

    #[test]
    fn test_deterministic_output() {
        let engine = FakeSynthesizer::default();
        let a = engine.synthesize(&SynthesisRequest::new("same")).unwrap();
        let b = engine.synthesize(&SynthesisRequest::new("same")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_speakers() {
        let engine = FakeSynthesizer::new(FakeSynthesizerConfig {
            speaker_ids: vec!["p225".to_string()],
            ..FakeSynthesizerConfig::default()
        });

        assert!(engine.supports_multi_speaker());
        assert!(engine.synthesize(&SynthesisRequest::new("x").with_speaker("p225")).is_ok());
        assert!(matches!(
            engine.synthesize(&SynthesisRequest::new("x").with_speaker("nobody")),
            Err(SynthesisError::UnknownSpeaker(_))
        ));
    }

    #[test]
    fn test_from_runtime_reads_profile() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{"use_gst": true, "num_speakers": 3, "audio": {"sample_rate": 16000}}"#,
        )
        .unwrap();

        let runtime = Arc::new(RuntimeConfig {
            model_name: None,
            vocoder_name: None,
            model_path: dir.path().join("model_file.pth"),
            config_path,
            vocoder_path: None,
            vocoder_config_path: None,
            speakers_file_path: None,
            port: 5002,
            use_cuda: false,
            debug: false,
            show_details: false,
        });

        let engine = FakeSynthesizer::from_runtime(&runtime).unwrap();
        assert_eq!(engine.sample_rate(), 16000);
        assert!(engine.supports_style_tokens());
        assert_eq!(engine.speaker_ids(), vec!["0", "1", "2"]);
    }
}
