//! Provisioner Adapter - 模型目录与下载

mod catalog;
mod model_manager;

pub use catalog::{format_model_list, ModelCatalog, ModelName};
pub use model_manager::{ModelManager, ModelManagerConfig, CONFIG_FILE, MODEL_FILE};
