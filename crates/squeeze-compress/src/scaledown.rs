use serde::{Deserialize, Serialize};
use squeeze_core::{estimate_tokens, CompressError, Compressed, Config, Rate};

use crate::Compressor;

/// Client for the ScaleDown compression service
///
/// Credentials travel with the instance; nothing is configured globally.
#[derive(Debug, Clone)]
pub struct ScaleDownCompressor {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    target_model: String,
    rate: Rate,
}

#[derive(Debug, Serialize)]
struct CompressBody<'a> {
    context: &'a str,
    prompt: &'a str,
    model: &'a str,
    scaledown: RateBody,
}

#[derive(Debug, Serialize)]
struct RateBody {
    rate: Rate,
}

#[derive(Debug, Deserialize)]
struct CompressReply {
    #[serde(alias = "content")]
    compressed_prompt: Option<String>,
    #[serde(alias = "original_tokens")]
    original_prompt_tokens: Option<u64>,
    #[serde(alias = "compressed_tokens")]
    compressed_prompt_tokens: Option<u64>,
    tokens: Option<(u64, u64)>,
    compression_ratio: Option<f64>,
}

impl ScaleDownCompressor {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            target_model: config.target_model.clone(),
            rate: config.rate,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Compressor for ScaleDownCompressor {
    async fn compress(&self, context: &str, prompt: &str) -> Result<Compressed, CompressError> {
        let body = CompressBody {
            context,
            prompt,
            model: &self.target_model,
            scaledown: RateBody { rate: self.rate },
        };

        let mut request = self
            .client
            .post(&self.api_url)
            .header("content-type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        tracing::debug!(url = %self.api_url, model = %self.target_model, "calling compression service");
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(CompressError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: CompressReply = serde_json::from_str(&text)
            .map_err(|e| CompressError::MalformedResponse(e.to_string()))?;
        reply.into_compressed(context)
    }
}

impl CompressReply {
    fn into_compressed(self, context: &str) -> Result<Compressed, CompressError> {
        let content = self.compressed_prompt.ok_or_else(|| {
            CompressError::MalformedResponse("missing compressed content".to_string())
        })?;

        let (original_tokens, compressed_tokens) =
            match (self.original_prompt_tokens, self.compressed_prompt_tokens, self.tokens) {
                (Some(o), Some(c), _) => (o, c),
                (_, _, Some(pair)) => pair,
                _ => (
                    estimate_tokens(context) as u64,
                    estimate_tokens(&content) as u64,
                ),
            };

        let ratio = self.compression_ratio.or_else(|| {
            (original_tokens > 0).then(|| compressed_tokens as f64 / original_tokens as f64)
        });

        Ok(Compressed {
            content,
            original_tokens,
            compressed_tokens,
            ratio,
        })
    }
}
