//! Index Query - 首页数据
//!
//! 首页只展示启动时确定的静态信息，构建时计算一次

use crate::application::ports::SynthesisEngine;
use crate::config::RuntimeConfig;

/// 首页视图
#[derive(Debug, Clone, PartialEq)]
pub struct IndexView {
    pub show_details: bool,
    pub use_multi_speaker: bool,
    /// 非多说话人模型为 None
    pub speaker_ids: Option<Vec<String>>,
    pub use_gst: bool,
    pub model_name: Option<String>,
    pub sample_rate: u32,
}

/// GetIndex Handler
pub struct GetIndexHandler {
    view: IndexView,
}

impl GetIndexHandler {
    pub fn new(runtime: &RuntimeConfig, engine: &dyn SynthesisEngine) -> Self {
        let use_multi_speaker = engine.supports_multi_speaker();
        let speaker_ids = Some(engine.speaker_ids()).filter(|ids| use_multi_speaker && !ids.is_empty());

        Self {
            view: IndexView {
                show_details: runtime.show_details,
                use_multi_speaker,
                speaker_ids,
                use_gst: engine.supports_style_tokens(),
                model_name: runtime.model_name.clone(),
                sample_rate: engine.sample_rate(),
            },
        }
    }

    pub fn handle(&self) -> IndexView {
        self.view.clone()
    }
}
