//! Engine Adapter - 合成引擎实现

mod fake_synthesizer;
mod model_profile;
mod process_synthesizer;

use std::sync::Arc;

pub use fake_synthesizer::{FakeSynthesizer, FakeSynthesizerConfig};
pub use model_profile::ModelProfile;
pub use process_synthesizer::{ProcessSynthesizer, ProcessSynthesizerConfig};

use crate::application::ports::{SynthesisEngine, SynthesisError};
use crate::config::{EngineConfig, EngineKind, RuntimeConfig};

/// 按配置构建合成引擎，进程启动时调用一次
pub fn build_engine(
    runtime: Arc<RuntimeConfig>,
    config: &EngineConfig,
) -> Result<Arc<dyn SynthesisEngine>, SynthesisError> {
    let engine: Arc<dyn SynthesisEngine> = match config.kind {
        EngineKind::Process => Arc::new(ProcessSynthesizer::load(
            runtime,
            ProcessSynthesizerConfig::from(config),
        )?),
        EngineKind::Fake => Arc::new(FakeSynthesizer::from_runtime(&runtime)?),
    };
    Ok(engine)
}
