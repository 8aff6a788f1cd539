//! Details Query - 详情页数据
//!
//! 每次请求都重新从磁盘读取模型与声码器配置，不做缓存

use std::path::Path;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::config::RuntimeConfig;

/// 详情页视图
#[derive(Debug, Clone)]
pub struct DetailsView {
    pub show_details: bool,
    pub model_config: serde_json::Value,
    pub vocoder_config: Option<serde_json::Value>,
    pub args: Vec<(String, String)>,
}

/// GetDetails Handler
pub struct GetDetailsHandler {
    runtime: Arc<RuntimeConfig>,
}

impl GetDetailsHandler {
    pub fn new(runtime: Arc<RuntimeConfig>) -> Self {
        Self { runtime }
    }

    pub async fn handle(&self) -> Result<DetailsView, ApplicationError> {
        let model_config = read_config(&self.runtime.config_path).await?;

        let vocoder_config = match &self.runtime.vocoder_config_path {
            Some(path) if is_file(path).await => Some(read_config(path).await?),
            _ => None,
        };

        Ok(DetailsView {
            show_details: self.runtime.show_details,
            model_config,
            vocoder_config,
            args: self.runtime.display_pairs(),
        })
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

async fn read_config(path: &Path) -> Result<serde_json::Value, ApplicationError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApplicationError::config_read(path, e))?;
    serde_json::from_str(&content).map_err(|e| ApplicationError::config_read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn runtime(config_path: PathBuf, vocoder_config_path: Option<PathBuf>) -> Arc<RuntimeConfig> {
        Arc::new(RuntimeConfig {
            model_name: None,
            vocoder_name: None,
            model_path: PathBuf::from("model_file.pth"),
            config_path,
            vocoder_path: None,
            vocoder_config_path,
            speakers_file_path: None,
            port: 5002,
            use_cuda: false,
            debug: false,
            show_details: true,
        })
    }

    #[tokio::test]
    async fn test_reads_config_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"model": "tacotron2"}"#).unwrap();

        let handler = GetDetailsHandler::new(runtime(config.clone(), None));
        let first = handler.handle().await.unwrap();
        assert_eq!(first.model_config["model"], "tacotron2");

        std::fs::write(&config, r#"{"model": "glow_tts"}"#).unwrap();
        let second = handler.handle().await.unwrap();
        assert_eq!(second.model_config["model"], "glow_tts");
    }

    #[tokio::test]
    async fn test_vocoder_config_only_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        let vocoder = dir.path().join("vocoder_config.json");
        std::fs::write(&config, "{}").unwrap();

        let handler = GetDetailsHandler::new(runtime(config.clone(), Some(vocoder.clone())));
        assert!(handler.handle().await.unwrap().vocoder_config.is_none());

        std::fs::write(&vocoder, r#"{"model": "hifigan"}"#).unwrap();
        let view = handler.handle().await.unwrap();
        assert_eq!(view.vocoder_config.unwrap()["model"], "hifigan");
    }

    #[tokio::test]
    async fn test_missing_model_config_is_an_error() {
        let handler = GetDetailsHandler::new(runtime(PathBuf::from("/no/such/config.json"), None));
        let err = handler.handle().await.unwrap_err();
        assert!(matches!(err, ApplicationError::ConfigRead { .. }));
    }
}
