//! TTS Server - 预训练语音合成模型的 HTTP 前端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 合成请求、风格参考、波形
//!
//! 应用层 (application/):
//! - Ports: SynthesisEngine, ModelProvisioner, AudioEncoder
//! - Commands: 文本合成
//! - Queries: 首页、详情页
//!
//! 配置 (config/):
//! - 命令行参数、设置文件、参数解析
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 页面 + `/api/tts`
//! - Adapters: 合成引擎、模型下载、WAV 编解码

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AppConfig, RuntimeConfig};
