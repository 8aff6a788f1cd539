//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Synthesis Context: 合成请求、风格参考、波形

pub mod synthesis;

pub use synthesis::{StyleError, StyleReference, SynthesisRequest, Waveform};
