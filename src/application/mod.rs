//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 端口定义（SynthesisEngine、ModelProvisioner、AudioEncoder）
//! - commands: 合成命令及处理器
//! - queries: 页面查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use commands::{SynthesizeSpeech, SynthesizeSpeechHandler, SynthesizeSpeechResponse};
pub use error::ApplicationError;
pub use ports::{
    AudioCodecError, AudioEncoderPort, CatalogEntry, EncodedAudio, ModelProvisionerPort,
    ProvisionError, ProvisionedModel, SynthesisEngine, SynthesisError,
};
pub use queries::{DetailsView, GetDetailsHandler, GetIndexHandler, IndexView};
