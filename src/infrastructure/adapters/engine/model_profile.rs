//! Model Profile - 从模型配置文件读取的能力信息
//!
//! 读取的字段：
//! - `audio.sample_rate`（有声码器时以声码器配置为准）
//! - `use_gst`
//! - `num_speakers` / `model_args.num_speakers`
//!
//! 说话人文件支持两种格式：
//! - `{"p225": 0, "p226": 1}`
//! - d-vector 文件 `{"clip.wav": {"name": "p225", "embedding": [...]}}`

use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use crate::application::ports::SynthesisError;
use crate::config::RuntimeConfig;

/// 配置中缺少采样率时的默认值
const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// 模型能力信息
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    pub model: Option<String>,
    pub sample_rate: u32,
    pub use_gst: bool,
    pub num_speakers: u32,
    pub has_speakers_file: bool,
    pub speaker_ids: Vec<String>,
}

impl ModelProfile {
    /// 从解析后的运行配置加载
    pub fn load(runtime: &RuntimeConfig) -> Result<Self, SynthesisError> {
        let config = read_json(&runtime.config_path)?;
        let vocoder_config = match &runtime.vocoder_config_path {
            Some(path) if path.is_file() => Some(read_json(path)?),
            _ => None,
        };
        let speakers = match &runtime.speakers_file_path {
            Some(path) => Some(read_json(path)?),
            None => None,
        };

        Self::from_values(&config, vocoder_config.as_ref(), speakers.as_ref())
    }

    pub fn from_values(
        config: &Value,
        vocoder_config: Option<&Value>,
        speakers: Option<&Value>,
    ) -> Result<Self, SynthesisError> {
        if !config.is_object() {
            return Err(SynthesisError::ModelLoad(
                "model config must be a JSON object".to_string(),
            ));
        }

        let sample_rate = vocoder_config
            .and_then(sample_rate_of)
            .or_else(|| sample_rate_of(config))
            .unwrap_or(DEFAULT_SAMPLE_RATE);

        let num_speakers = config
            .get("num_speakers")
            .or_else(|| config.pointer("/model_args/num_speakers"))
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32;

        let speaker_ids = match speakers {
            Some(value) => parse_speaker_ids(value)?,
            None => Vec::new(),
        };

        Ok(Self {
            model: config.get("model").and_then(Value::as_str).map(str::to_string),
            sample_rate,
            use_gst: config.get("use_gst").and_then(Value::as_bool).unwrap_or(false),
            num_speakers,
            has_speakers_file: speakers.is_some(),
            speaker_ids,
        })
    }

    /// 多说话人：说话人数大于 1，或提供了说话人文件
    pub fn is_multi_speaker(&self) -> bool {
        self.num_speakers > 1 || self.has_speakers_file
    }
}

fn sample_rate_of(config: &Value) -> Option<u32> {
    config
        .pointer("/audio/sample_rate")
        .and_then(Value::as_u64)
        .map(|rate| rate as u32)
}

fn parse_speaker_ids(value: &Value) -> Result<Vec<String>, SynthesisError> {
    let map = value.as_object().ok_or_else(|| {
        SynthesisError::ModelLoad("speakers file must be a JSON object".to_string())
    })?;

    let ids: BTreeSet<String> = map
        .iter()
        .map(|(key, entry)| match entry.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => key.clone(),
        })
        .collect();

    Ok(ids.into_iter().collect())
}

fn read_json(path: &Path) -> Result<Value, SynthesisError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SynthesisError::ModelLoad(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        SynthesisError::ModelLoad(format!("invalid JSON in {}: {}", path.display(), e))
    })
}
