//! Configuration Module
//!
//! 两类配置：
//! - 服务设置（AppConfig）：默认值 < 配置文件 < 环境变量
//! - 运行配置（RuntimeConfig）：命令行参数解析出的模型文件路径

mod args;
mod loader;
mod runtime;
mod types;

pub use args::{CliArgs, DEFAULT_MODEL_NAME};
pub use loader::{load_config_from_path, print_config, ConfigError};
pub use runtime::{ArgumentResolver, ResolveError, RuntimeConfig};
pub use types::{
    AppConfig, EngineConfig, EngineKind, LogConfig, ProvisionerConfig, ServerConfig,
    StaticFilesConfig, DEFAULT_PORT,
};
