//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{AudioCodecError, SynthesisError};
use crate::domain::StyleError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求参数错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 合成引擎错误
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// 音频编码错误
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// 配置文件读取错误
    #[error("Failed to read {path}: {message}")]
    ConfigRead { path: String, message: String },

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建配置读取错误
    pub fn config_read(path: &std::path::Path, message: impl std::fmt::Display) -> Self {
        Self::ConfigRead {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<StyleError> for ApplicationError {
    fn from(err: StyleError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<SynthesisError> for ApplicationError {
    fn from(err: SynthesisError) -> Self {
        match err {
            err @ SynthesisError::UnsupportedStyle(_) => Self::ValidationError(err.to_string()),
            other => Self::SynthesisFailed(other.to_string()),
        }
    }
}

impl From<AudioCodecError> for ApplicationError {
    fn from(err: AudioCodecError) -> Self {
        Self::EncodingFailed(err.to_string())
    }
}
