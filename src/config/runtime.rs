//! Runtime Configuration
//!
//! 将命令行参数解析为一组固定的模型文件路径。启动时构建一次，之后只读。

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::args::CliArgs;
use crate::application::ports::{ModelProvisionerPort, ProvisionError};

/// 参数解析错误（启动即失败）
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No model selected: pass --model_name or --model_path")]
    MissingModel,

    #[error("--model_path requires --config_path")]
    MissingConfig,

    #[error("{kind} not found: {path}")]
    FileNotFound { kind: &'static str, path: PathBuf },

    #[error("Failed to provision {name}: {source}")]
    Provision {
        name: String,
        #[source]
        source: ProvisionError,
    },
}

/// 已解析的运行配置
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    pub model_name: Option<String>,
    pub vocoder_name: Option<String>,
    pub model_path: PathBuf,
    pub config_path: PathBuf,
    pub vocoder_path: Option<PathBuf>,
    pub vocoder_config_path: Option<PathBuf>,
    pub speakers_file_path: Option<PathBuf>,
    pub port: u16,
    pub use_cuda: bool,
    pub debug: bool,
    pub show_details: bool,
}

impl RuntimeConfig {
    /// 以 (参数名, 值) 列表形式展示，用于详情页
    pub fn display_pairs(&self) -> Vec<(String, String)> {
        fn path(p: &Option<PathBuf>) -> String {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "None".to_string())
        }

        vec![
            (
                "model_name".to_string(),
                self.model_name.clone().unwrap_or_else(|| "None".to_string()),
            ),
            (
                "vocoder_name".to_string(),
                self.vocoder_name.clone().unwrap_or_else(|| "None".to_string()),
            ),
            ("model_path".to_string(), self.model_path.display().to_string()),
            ("config_path".to_string(), self.config_path.display().to_string()),
            ("vocoder_path".to_string(), path(&self.vocoder_path)),
            ("vocoder_config_path".to_string(), path(&self.vocoder_config_path)),
            ("speakers_file_path".to_string(), path(&self.speakers_file_path)),
            ("port".to_string(), self.port.to_string()),
            ("use_cuda".to_string(), self.use_cuda.to_string()),
            ("debug".to_string(), self.debug.to_string()),
            ("show_details".to_string(), self.show_details.to_string()),
        ]
    }
}

/// 参数解析器
///
/// 顺序：
/// 1. 按模型名下载 TTS 模型，未指定声码器时采用模型的默认声码器
/// 2. 按声码器名下载声码器
/// 3. 显式路径覆盖上面的结果
pub struct ArgumentResolver<'a> {
    provisioner: &'a dyn ModelProvisionerPort,
    default_port: u16,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(provisioner: &'a dyn ModelProvisionerPort, default_port: u16) -> Self {
        Self {
            provisioner,
            default_port,
        }
    }

    pub async fn resolve(&self, args: &CliArgs) -> Result<RuntimeConfig, ResolveError> {
        let mut model_path = None;
        let mut config_path = None;
        let mut speakers_file_path = None;
        let mut vocoder_path = None;
        let mut vocoder_config_path = None;
        let mut vocoder_name = args.vocoder_name().map(str::to_string);
        let model_name = args.model_name().map(str::to_string);

        if let (Some(name), None) = (&model_name, &args.model_path) {
            let model = self.provision(name).await?;
            model_path = Some(model.weights_path);
            config_path = Some(model.config_path);
            if vocoder_name.is_none() {
                vocoder_name = model.metadata.default_vocoder;
            }
        }

        if let (Some(name), None) = (&vocoder_name, &args.vocoder_path) {
            let vocoder = self.provision(name).await?;
            vocoder_path = Some(vocoder.weights_path);
            vocoder_config_path = Some(vocoder.config_path);
        }

        if let Some(path) = &args.model_path {
            model_path = Some(path.clone());
            config_path = Some(args.config_path.clone().ok_or(ResolveError::MissingConfig)?);
            speakers_file_path = args.speakers_file_path.clone();
        }

        if let Some(path) = &args.vocoder_path {
            vocoder_path = Some(path.clone());
            vocoder_config_path = args.vocoder_config_path.clone();
        }

        let model_path = model_path.ok_or(ResolveError::MissingModel)?;
        let config_path = config_path.ok_or(ResolveError::MissingConfig)?;

        require_file("Model file", &model_path)?;
        require_file("Model config", &config_path)?;
        if let Some(path) = &vocoder_path {
            require_file("Vocoder file", path)?;
        }
        if let Some(path) = &speakers_file_path {
            require_file("Speakers file", path)?;
        }

        let config = RuntimeConfig {
            model_name: if args.model_path.is_some() { None } else { model_name },
            vocoder_name: if args.vocoder_path.is_some() { None } else { vocoder_name },
            model_path,
            config_path,
            vocoder_path,
            vocoder_config_path,
            speakers_file_path,
            port: args.port.unwrap_or(self.default_port),
            use_cuda: args.use_cuda,
            debug: args.debug,
            show_details: args.show_details,
        };

        tracing::info!(
            model = %config.model_path.display(),
            config = %config.config_path.display(),
            vocoder = ?config.vocoder_path,
            speakers = ?config.speakers_file_path,
            "Model files resolved"
        );

        Ok(config)
    }

    async fn provision(
        &self,
        name: &str,
    ) -> Result<crate::application::ports::ProvisionedModel, ResolveError> {
        self.provisioner
            .resolve(name)
            .await
            .map_err(|source| ResolveError::Provision {
                name: name.to_string(),
                source,
            })
    }
}

fn require_file(kind: &'static str, path: &Path) -> Result<(), ResolveError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ResolveError::FileNotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}
