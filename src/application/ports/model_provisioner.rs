//! Model Provisioner Port - 预训练模型解析
//!
//! 将模型名（`<type>/<lang>/<dataset>/<model>`）解析为本地文件路径，必要时下载。

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// 模型解析错误
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Invalid model name {0:?}: expected <type>/<language>/<dataset>/<model>")]
    InvalidName(String),

    #[error("Model not found in catalog: {0}")]
    UnknownModel(String),

    #[error("Model {0} is not cached locally and no download mirror is configured")]
    NoMirror(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 模型目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// 完整名称，例如 `tts_models/en/ljspeech/tacotron2-DDC`
    pub name: String,
    pub model_type: String,
    pub language: String,
    pub dataset: String,
    pub model: String,
    pub description: Option<String>,
    /// 默认声码器（仅 TTS 模型）
    pub default_vocoder: Option<String>,
    pub license: Option<String>,
}

/// 已就绪的模型文件
#[derive(Debug, Clone)]
pub struct ProvisionedModel {
    pub weights_path: PathBuf,
    pub config_path: PathBuf,
    pub metadata: CatalogEntry,
}

/// Model Provisioner Port
#[async_trait]
pub trait ModelProvisionerPort: Send + Sync {
    /// 列出目录中的所有模型
    fn list_models(&self) -> Vec<CatalogEntry>;

    /// 解析（必要时下载）模型
    async fn resolve(&self, name: &str) -> Result<ProvisionedModel, ProvisionError>;
}
