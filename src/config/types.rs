//! Configuration Types
//!
//! 定义服务设置结构体（区别于命令行解析出的 RuntimeConfig）

use serde::Deserialize;
use std::path::PathBuf;

/// 默认监听端口（命令行与设置文件共用）
pub const DEFAULT_PORT: u16 = 5002;

/// 服务设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 合成引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 模型下载配置
    #[serde(default)]
    pub provisioner: ProvisionerConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 监听地址，端口取命令行解析后的值
    pub fn listen_addr(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_static_path() -> String {
    "/static".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

/// 引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// 调用外部合成运行时进程
    #[default]
    Process,
    /// 生成测试音，不需要运行时
    Fake,
}

/// 合成引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub kind: EngineKind,

    /// 运行时可执行文件
    #[serde(default = "default_engine_program")]
    pub program: String,

    /// 附加在每次调用前面的参数
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// 临时输出目录，未设置时使用系统临时目录
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

fn default_engine_program() -> String {
    "tts".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            program: default_engine_program(),
            extra_args: Vec::new(),
            work_dir: None,
        }
    }
}

/// 模型下载配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionerConfig {
    /// 模型目录文件，未设置时使用内置目录
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// 本地模型缓存目录
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// 模型镜像 Base URL，未设置时只使用本地缓存
    #[serde(default)]
    pub mirror_url: Option<String>,

    /// 单个文件下载超时（秒）
    #[serde(default = "default_download_timeout")]
    pub timeout_secs: u64,
}

fn default_download_timeout() -> u64 {
    600
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            cache_dir: None,
            mirror_url: None,
            timeout_secs: default_download_timeout(),
        }
    }
}

impl ProvisionerConfig {
    /// 实际使用的缓存目录：`~/.local/share/tts-server/models`
    pub fn effective_cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("tts-server")
            .join("models")
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
