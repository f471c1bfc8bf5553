use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AdapterError;
use crate::tokens::estimate_tokens;

/// Prompt used when the request omits one (or sends `null`)
pub const DEFAULT_PROMPT: &str = "Summarize the key points";

/// Request document read from stdin
///
/// Fields are extracted best-effort: unknown keys are ignored, a missing
/// `context` is empty, and a `prompt` that is missing or not a string falls
/// back to [`DEFAULT_PROMPT`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressRequest {
    pub context: String,
    pub prompt: Option<String>,
}

impl CompressRequest {
    /// Parse a raw request document; the top level must be a JSON object
    pub fn parse(raw: &str) -> Result<Self, AdapterError> {
        let value: Value = serde_json::from_str(raw)?;
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(AdapterError::NotAnObject(json_kind(&other))),
        };

        let context = match fields.get("context") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(AdapterError::InvalidField {
                    field: "context",
                    found: json_kind(other),
                })
            }
        };
        let prompt = fields
            .get("prompt")
            .and_then(Value::as_str)
            .map(String::from);

        Ok(Self { context, prompt })
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Result of a compressor backend, before it is shaped for the wire
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed {
    pub content: String,
    pub original_tokens: u64,
    pub compressed_tokens: u64,
    /// compressed / original, when the backend could compute one
    pub ratio: Option<f64>,
}

/// Response document written to stdout, exactly one per invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressResponse {
    pub content: String,
    pub original_tokens: u64,
    pub compressed_tokens: u64,
    pub compression_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompressResponse {
    /// Short-text bypass: content is echoed back with heuristic token counts
    pub fn passthrough(context: String) -> Self {
        let tokens = estimate_tokens(&context) as u64;
        Self {
            content: context,
            original_tokens: tokens,
            compressed_tokens: tokens,
            compression_ratio: 1.0,
            error: None,
        }
    }

    /// Degraded response; `context` is empty when the request never parsed
    pub fn fallback(context: String, error: impl ToString) -> Self {
        Self {
            content: context,
            original_tokens: 0,
            compressed_tokens: 0,
            compression_ratio: 1.0,
            error: Some(error.to_string()),
        }
    }
}

impl From<Compressed> for CompressResponse {
    fn from(c: Compressed) -> Self {
        Self {
            content: c.content,
            original_tokens: c.original_tokens,
            compressed_tokens: c.compressed_tokens,
            compression_ratio: round_ratio(c.ratio),
            error: None,
        }
    }
}

/// Round to two decimals; a missing, zero or non-finite ratio becomes 1.0
pub fn round_ratio(ratio: Option<f64>) -> f64 {
    match ratio {
        Some(r) if r.is_finite() && r != 0.0 => (r * 100.0).round() / 100.0,
        _ => 1.0,
    }
}
