//! Context compression backends

mod extractive;
mod scaledown;

pub use extractive::ExtractiveCompressor;
pub use scaledown::ScaleDownCompressor;

use squeeze_core::{CompressError, Compressed, Config, Engine};

/// A backend that shrinks `context` while keeping what matters for `prompt`
#[allow(async_fn_in_trait)]
pub trait Compressor {
    async fn compress(&self, context: &str, prompt: &str) -> Result<Compressed, CompressError>;
}

/// Compressor selected at runtime from [`Engine`]
pub enum AnyCompressor {
    ScaleDown(ScaleDownCompressor),
    Extractive(ExtractiveCompressor),
}

impl AnyCompressor {
    pub fn from_config(config: &Config) -> Self {
        match config.engine {
            Engine::ScaleDown => AnyCompressor::ScaleDown(ScaleDownCompressor::new(config)),
            Engine::Extractive => {
                AnyCompressor::Extractive(ExtractiveCompressor::new(config.max_tokens))
            }
        }
    }

    pub fn engine(&self) -> Engine {
        match self {
            AnyCompressor::ScaleDown(_) => Engine::ScaleDown,
            AnyCompressor::Extractive(_) => Engine::Extractive,
        }
    }
}

impl Compressor for AnyCompressor {
    async fn compress(&self, context: &str, prompt: &str) -> Result<Compressed, CompressError> {
        match self {
            AnyCompressor::ScaleDown(c) => c.compress(context, prompt).await,
            AnyCompressor::Extractive(c) => c.compress(context, prompt).await,
        }
    }
}
