//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_encoder;
mod model_provisioner;
mod synthesis_engine;

pub use audio_encoder::{AudioCodecError, AudioEncoderPort, EncodedAudio};
pub use model_provisioner::{CatalogEntry, ModelProvisionerPort, ProvisionError, ProvisionedModel};
pub use synthesis_engine::{SynthesisEngine, SynthesisError};
