//! 应用层 - 命令
//!
//! 目前只有一个命令：文本合成

mod synthesize;

pub use synthesize::{SynthesizeSpeech, SynthesizeSpeechHandler, SynthesizeSpeechResponse};
