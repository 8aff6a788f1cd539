//! Application State
//!
//! 启动时构建一次，通过 axum `State` 传给每个路由

use std::sync::Arc;

use crate::application::{
    AudioEncoderPort, GetDetailsHandler, GetIndexHandler, SynthesisEngine,
    SynthesizeSpeechHandler,
};
use crate::config::RuntimeConfig;

/// 应用状态
pub struct AppState {
    pub runtime: Arc<RuntimeConfig>,
    pub engine: Arc<dyn SynthesisEngine>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,

    // ========== Query Handlers ==========
    pub index_handler: GetIndexHandler,
    pub details_handler: GetDetailsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        runtime: Arc<RuntimeConfig>,
        engine: Arc<dyn SynthesisEngine>,
        encoder: Arc<dyn AudioEncoderPort>,
    ) -> Self {
        Self {
            index_handler: GetIndexHandler::new(&runtime, engine.as_ref()),
            details_handler: GetDetailsHandler::new(runtime.clone()),
            synthesize_handler: SynthesizeSpeechHandler::new(engine.clone(), encoder),
            runtime,
            engine,
        }
    }
}
