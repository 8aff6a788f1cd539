//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成请求建模
//! - style_wav 参数解析（参考音频路径 / GST token 权重）
//! - 合成结果（波形）

mod errors;
mod style;
mod value_objects;

pub use errors::StyleError;
pub use style::StyleReference;
pub use value_objects::{SynthesisRequest, Waveform};
