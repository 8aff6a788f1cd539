//! Command-line arguments
//!
//! 与原有部署脚本保持一致的 snake_case 参数名；布尔参数接受
//! `true` / `1` / `yes`，只写参数名等同于 `true`。

use clap::{ArgAction, Parser};
use serde::Serialize;
use std::path::PathBuf;

/// 未指定 `--model_name` 时使用的预训练模型
pub const DEFAULT_MODEL_NAME: &str = "tts_models/en/ljspeech/tacotron2-DDC";

/// 解析布尔参数，无法识别的值视为 false
fn parse_bool(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    ))
}

/// TTS server - serve a pre-trained speech-synthesis model over HTTP
#[derive(Parser, Debug, Clone, Serialize)]
#[command(name = "tts-server", version, about)]
pub struct CliArgs {
    /// List available pre-trained tts and vocoder models
    #[arg(
        long = "list_models",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    pub list_models: bool,

    /// Name of one of the pre-trained tts models in format <type>/<language>/<dataset>/<model>
    #[arg(long = "model_name", default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// Name of one of the released vocoder models
    #[arg(long = "vocoder_name")]
    pub vocoder_name: Option<String>,

    /// Path to model config file
    #[arg(long = "config_path")]
    pub config_path: Option<PathBuf>,

    /// Path to model file
    #[arg(long = "model_path")]
    pub model_path: Option<PathBuf>,

    /// Path to vocoder model file
    #[arg(long = "vocoder_path")]
    pub vocoder_path: Option<PathBuf>,

    /// Path to vocoder model config file
    #[arg(long = "vocoder_config_path")]
    pub vocoder_config_path: Option<PathBuf>,

    /// JSON file for multi-speaker model
    #[arg(long = "speakers_file_path")]
    pub speakers_file_path: Option<PathBuf>,

    /// Port to listen on [default: 5002, or server.port from the settings file]
    #[arg(long)]
    pub port: Option<u16>,

    /// true to run the model on CUDA
    #[arg(
        long = "use_cuda",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    pub use_cuda: bool,

    /// true to enable debug logging
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    pub debug: bool,

    /// Generate model detail page
    #[arg(
        long = "show_details",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    pub show_details: bool,

    /// Server settings file (TOML)
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

impl CliArgs {
    /// 模型名，空字符串视为未指定
    pub fn model_name(&self) -> Option<&str> {
        Some(self.model_name.as_str()).filter(|name| !name.is_empty())
    }

    /// 声码器名，空字符串视为未指定
    pub fn vocoder_name(&self) -> Option<&str> {
        self.vocoder_name.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["tts-server"]).unwrap();
        assert!(!args.list_models);
        assert_eq!(args.model_name(), Some(DEFAULT_MODEL_NAME));
        assert_eq!(args.vocoder_name(), None);
        assert_eq!(args.port, None);
        assert!(!args.use_cuda);
        assert!(!args.show_details);
    }

    #[test]
    fn test_bare_boolean_flag_means_true() {
        let args = CliArgs::try_parse_from(["tts-server", "--list_models"]).unwrap();
        assert!(args.list_models);
    }

    #[test]
    fn test_boolean_values() {
        let args = CliArgs::try_parse_from([
            "tts-server",
            "--use_cuda",
            "yes",
            "--debug",
            "0",
            "--show_details",
            "TRUE",
        ])
        .unwrap();
        assert!(args.use_cuda);
        assert!(!args.debug);
        assert!(args.show_details);
    }

    #[test]
    fn test_explicit_paths_and_port() {
        let args = CliArgs::try_parse_from([
            "tts-server",
            "--model_path",
            "/models/best_model.pth",
            "--config_path",
            "/models/config.json",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(args.model_path, Some(PathBuf::from("/models/best_model.pth")));
        assert_eq!(args.config_path, Some(PathBuf::from("/models/config.json")));
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn test_empty_names_are_none() {
        let args =
            CliArgs::try_parse_from(["tts-server", "--model_name", "", "--vocoder_name", ""])
                .unwrap();
        assert_eq!(args.model_name(), None);
        assert_eq!(args.vocoder_name(), None);
    }
}
