//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, EngineKind, DEFAULT_PORT};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 从指定路径加载配置
///
/// # 环境变量示例
/// - `TTS_SERVER_SERVER__PORT=8080`
/// - `TTS_SERVER_ENGINE__PROGRAM=/opt/tts/bin/tts`
/// - `TTS_SERVER_PROVISIONER__MIRROR_URL=http://models.internal`
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", DEFAULT_PORT as i64)?
        .set_default("engine.kind", "process")?
        .set_default("engine.program", "tts")?
        .set_default("provisioner.timeout_secs", 600)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），例如 TTS_SERVER_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("TTS_SERVER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.engine.kind == EngineKind::Process && config.engine.program.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine program cannot be empty".to_string(),
        ));
    }

    if config.server.static_files.enabled && !config.server.static_files.path.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "Static files path must start with '/': {}",
            config.server.static_files.path
        )));
    }

    if let Some(url) = &config.provisioner.mirror_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "Mirror URL must be http(s): {}",
                url
            )));
        }
    }

    if config.provisioner.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Download timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），`port` 为解析 `--port` 之后的实际端口
pub fn print_config(config: &AppConfig, port: u16) {
    tracing::info!("=== Server Settings ===");
    tracing::info!("Server: {}", config.server.listen_addr(port));
    tracing::info!("Engine: {:?} ({})", config.engine.kind, config.engine.program);
    tracing::info!(
        "Model Cache: {}",
        config.provisioner.effective_cache_dir().display()
    );
    tracing::info!(
        "Model Mirror: {}",
        config.provisioner.mirror_url.as_deref().unwrap_or("<none>")
    );
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {} -> {}",
            config.server.static_files.path,
            config.server.static_files.dir.display()
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=======================");
}
