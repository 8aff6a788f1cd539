//! TTS Server - 预训练语音合成模型的 HTTP 前端
//!
//! 启动流程：
//! 1. 解析命令行参数，加载设置
//! 2. `--list_models` 时打印模型目录后退出
//! 3. 解析模型文件（必要时下载），加载合成引擎
//! 4. 启动 HTTP 服务器

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use tts_server::application::ModelProvisionerPort;
use tts_server::config::{load_config_from_path, print_config, ArgumentResolver, CliArgs, LogConfig};
use tts_server::infrastructure::adapters::{build_engine, format_model_list, ModelManager, WavCodec};
use tts_server::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 加载设置（优先级：环境变量 > 配置文件 > 默认值）
    let settings = load_config_from_path(args.settings.as_deref()).context("Failed to load settings")?;

    init_tracing(&settings.log, args.debug);

    let provisioner =
        ModelManager::from_config(&settings.provisioner).context("Failed to load model catalog")?;

    if args.list_models {
        print!("{}", format_model_list(&provisioner.list_models()));
        return Ok(());
    }

    tracing::info!("TTS Server v{}", env!("CARGO_PKG_VERSION"));

    let runtime = ArgumentResolver::new(&provisioner, settings.server.port)
        .resolve(&args)
        .await
        .context("Failed to resolve model files")?;
    let runtime = Arc::new(runtime);
    print_config(&settings, runtime.port);

    let engine = build_engine(runtime.clone(), &settings.engine)
        .context("Failed to load synthesis engine")?;

    let state = AppState::new(runtime.clone(), engine, Arc::new(WavCodec::new()));
    let server = HttpServer::new(
        &settings.server.host,
        runtime.port,
        settings.server.static_files.clone(),
        state,
    );

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先，`--debug` 强制 debug 级别
fn init_tracing(log: &LogConfig, debug: bool) {
    let level = if debug { "debug" } else { log.level.as_str() };
    let log_filter = format!("{},tts_server={},tower_http=debug", level, level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
