//! Runtime configuration for the bridge

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::tokens::MIN_COMPRESS_CHARS;

pub const DEFAULT_API_URL: &str = "https://api.scaledown.xyz/compress/raw/";
pub const DEFAULT_TARGET_MODEL: &str = "gpt-4o";

pub const DEFAULT_MAX_TOKENS: usize = 1000;

const API_KEY_VAR: &str = "SCALEDOWN_API_KEY";
const API_URL_VAR: &str = "SCALEDOWN_API_URL";

/// Compression rate policy sent to the service
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rate {
    Auto,
    Fixed(f64),
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rate::Auto => serializer.serialize_str("auto"),
            Rate::Fixed(r) => serializer.serialize_f64(*r),
        }
    }
}

impl FromStr for Rate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Rate::Auto);
        }
        match s.parse::<f64>() {
            Ok(r) if r > 0.0 && r <= 1.0 => Ok(Rate::Fixed(r)),
            _ => Err(format!("invalid rate '{}': expected 'auto' or a number in (0, 1]", s)),
        }
    }
}

/// Which compressor backend handles contexts above the bypass threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    ScaleDown,
    Extractive,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scaledown" => Ok(Engine::ScaleDown),
            "extractive" => Ok(Engine::Extractive),
            other => Err(format!(
                "unknown engine '{}': expected 'scaledown' or 'extractive'",
                other
            )),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::ScaleDown => f.write_str("scaledown"),
            Engine::Extractive => f.write_str("extractive"),
        }
    }
}

/// Bridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Service credential, passed to the compressor at construction
    pub api_key: Option<String>,

    /// Compression endpoint
    pub api_url: String,

    /// Model the compressed text is tuned for
    pub target_model: String,

    pub rate: Rate,

    pub engine: Engine,

    /// Contexts below this many characters skip compression
    pub min_chars: usize,

    /// Output budget for the extractive engine, in estimated tokens
    pub max_tokens: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            target_model: DEFAULT_TARGET_MODEL.to_string(),
            rate: Rate::Auto,
            engine: Engine::ScaleDown,
            min_chars: MIN_COMPRESS_CHARS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new();
        config.api_key = non_empty(API_KEY_VAR);
        if let Some(url) = non_empty(API_URL_VAR) {
            config.api_url = url;
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
