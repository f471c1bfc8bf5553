//! Wire types, configuration and error taxonomy for the compression bridge

mod config;
mod error;
mod tokens;
mod types;

pub use config::{
    Config, Engine, Rate, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_TARGET_MODEL,
};
pub use error::{AdapterError, CompressError};
pub use tokens::{char_len, estimate_tokens, is_below_threshold, MIN_COMPRESS_CHARS};
pub use types::{round_ratio, Compressed, CompressRequest, CompressResponse, DEFAULT_PROMPT};
