//! Synthesis Engine Port - 语音合成引擎抽象
//!
//! 模型加载、声码器和波形生成都属于外部合成运行时，
//! 本 crate 只通过该接口调用。具体实现在 infrastructure/adapters 层。

use thiserror::Error;

use crate::domain::{SynthesisRequest, Waveform};

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Failed to start synthesis runtime: {0}")]
    Spawn(String),

    #[error("Synthesis runtime exited with {status}: {stderr}")]
    RuntimeFailed { status: String, stderr: String },

    #[error("Invalid runtime output: {0}")]
    InvalidOutput(String),

    #[error("Unknown speaker: {0}")]
    UnknownSpeaker(String),

    #[error("Unsupported style: {0}")]
    UnsupportedStyle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synthesis Engine Port
///
/// 进程级单例，加载后只读，可在多个请求间并发共享。
/// `synthesize` 是阻塞调用，调用方负责把它放到阻塞线程池。
pub trait SynthesisEngine: Send + Sync {
    /// 将文本合成为波形
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Waveform, SynthesisError>;

    /// 输出采样率
    fn sample_rate(&self) -> u32;

    /// 是否为多说话人模型
    fn supports_multi_speaker(&self) -> bool;

    /// 已知说话人 ID，非多说话人模型返回空列表
    fn speaker_ids(&self) -> Vec<String> {
        Vec::new()
    }

    /// 是否启用 GST 风格 token
    fn supports_style_tokens(&self) -> bool;
}
