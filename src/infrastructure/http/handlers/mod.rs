//! HTTP Handlers

mod pages;
mod ping;
mod tts;

pub use pages::*;
pub use ping::*;
pub use tts::*;
