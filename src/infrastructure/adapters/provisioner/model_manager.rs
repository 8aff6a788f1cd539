//! Model Manager - 本地缓存 + HTTP 镜像下载
//!
//! 缓存布局：
//!
//! ```text
//! <cache_dir>/tts_models--en--ljspeech--tacotron2-DDC/
//!     model_file.pth
//!     config.json
//! ```
//!
//! 缓存完整时不访问网络；否则从 `<mirror_url>/<目录名>/<文件名>` 下载，
//! 先写入临时文件再重命名。

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use super::catalog::{ModelCatalog, ModelName};
use crate::application::ports::{
    CatalogEntry, ModelProvisionerPort, ProvisionError, ProvisionedModel,
};
use crate::config::ProvisionerConfig;

/// 模型权重文件名
pub const MODEL_FILE: &str = "model_file.pth";
/// 模型配置文件名
pub const CONFIG_FILE: &str = "config.json";

/// Model Manager 配置
#[derive(Debug, Clone)]
pub struct ModelManagerConfig {
    pub cache_dir: PathBuf,
    pub mirror_url: Option<String>,
    pub timeout_secs: u64,
}

impl From<&ProvisionerConfig> for ModelManagerConfig {
    fn from(config: &ProvisionerConfig) -> Self {
        Self {
            cache_dir: config.effective_cache_dir(),
            mirror_url: config
                .mirror_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string()),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Model Manager
pub struct ModelManager {
    catalog: ModelCatalog,
    config: ModelManagerConfig,
    client: Client,
}

impl ModelManager {
    pub fn new(catalog: ModelCatalog, config: ModelManagerConfig) -> Result<Self, ProvisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProvisionError::Download(e.to_string()))?;

        Ok(Self {
            catalog,
            config,
            client,
        })
    }

    /// 按设置构建：自定义目录文件优先，否则使用内置目录
    pub fn from_config(config: &ProvisionerConfig) -> Result<Self, ProvisionError> {
        let catalog = match &config.catalog_path {
            Some(path) => ModelCatalog::from_file(path)?,
            None => ModelCatalog::builtin()?,
        };
        Self::new(catalog, ModelManagerConfig::from(config))
    }

    async fn download(&self, url: &str, target: &Path) -> Result<(), ProvisionError> {
        tracing::info!(url = %url, target = %target.display(), "Downloading model file");

        let response = self.client.get(url).send().await.map_err(|e| map_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvisionError::Download(format!("HTTP {} for {}", status, url)));
        }

        let tmp = target.with_file_name(format!(
            ".{}.{}.part",
            target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            uuid::Uuid::new_v4()
        ));

        let result = self.write_stream(response, &tmp, url).await;
        if result.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
            return result;
        }

        tokio::fs::rename(&tmp, target).await?;
        Ok(())
    }

    async fn write_stream(
        &self,
        response: reqwest::Response,
        tmp: &Path,
        url: &str,
    ) -> Result<(), ProvisionError> {
        let mut file = tokio::fs::File::create(tmp).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| map_reqwest(url, e))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(url = %url, bytes = written, "Download finished");
        Ok(())
    }
}

fn map_reqwest(url: &str, e: reqwest::Error) -> ProvisionError {
    if e.is_timeout() {
        ProvisionError::Timeout(url.to_string())
    } else if e.is_connect() {
        ProvisionError::Download(format!("Cannot connect to model mirror: {}", e))
    } else {
        ProvisionError::Download(e.to_string())
    }
}

#[async_trait]
impl ModelProvisionerPort for ModelManager {
    fn list_models(&self) -> Vec<CatalogEntry> {
        self.catalog.entries().to_vec()
    }

    async fn resolve(&self, name: &str) -> Result<ProvisionedModel, ProvisionError> {
        let parsed = ModelName::parse(name)?;
        let metadata = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| ProvisionError::UnknownModel(name.to_string()))?;

        let dir_name = parsed.cache_dir_name();
        let dir = self.config.cache_dir.join(&dir_name);
        let weights_path = dir.join(MODEL_FILE);
        let config_path = dir.join(CONFIG_FILE);

        if weights_path.is_file() && config_path.is_file() {
            tracing::info!(model = %name, path = %dir.display(), "Model found in cache");
            return Ok(ProvisionedModel {
                weights_path,
                config_path,
                metadata,
            });
        }

        let mirror = self
            .config
            .mirror_url
            .as_deref()
            .ok_or_else(|| ProvisionError::NoMirror(name.to_string()))?;

        tokio::fs::create_dir_all(&dir).await?;
        for (file, target) in [(MODEL_FILE, &weights_path), (CONFIG_FILE, &config_path)] {
            if target.is_file() {
                continue;
            }
            let url = format!("{}/{}/{}", mirror, dir_name, file);
            self.download(&url, target).await?;
        }

        tracing::info!(model = %name, path = %dir.display(), "Model downloaded");

        Ok(ProvisionedModel {
            weights_path,
            config_path,
            metadata,
        })
    }
}
