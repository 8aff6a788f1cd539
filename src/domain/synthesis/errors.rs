//! Synthesis Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("style_wav is neither a local .wav file nor valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("style_wav JSON must be an object of token weights, got {0}")]
    NotAMapping(&'static str),

    #[error("style token {token:?} has a non-numeric weight")]
    InvalidWeight { token: String },
}
