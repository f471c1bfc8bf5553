//! stdin → compressor → stdout adapter
//!
//! Exactly one response document is written per invocation. Every failure is
//! folded into a fallback response so the caller never sees a crash.

use squeeze_compress::{AnyCompressor, Compressor};
use squeeze_core::{is_below_threshold, AdapterError, CompressRequest, CompressResponse, Config};
use std::io::{self, Read, Write};

use crate::cli::CompressArgs;

pub fn run(args: &CompressArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    args.apply(&mut config);

    let mut raw = String::new();
    let response = match io::stdin().read_to_string(&mut raw) {
        Ok(_) => respond(&raw, &config),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stdin");
            CompressResponse::fallback(String::new(), AdapterError::from(e))
        }
    };

    write_response(&mut io::stdout().lock(), &response)?;
    Ok(())
}

fn respond(raw: &str, config: &Config) -> CompressResponse {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            let context = CompressRequest::parse(raw)
                .map(|r| r.context)
                .unwrap_or_default();
            return CompressResponse::fallback(context, AdapterError::from(e));
        }
    };

    let compressor = AnyCompressor::from_config(config);
    if let AnyCompressor::ScaleDown(scaledown) = &compressor {
        if !scaledown.has_api_key() {
            tracing::debug!("SCALEDOWN_API_KEY not set, calling service without credentials");
        }
    }
    tracing::debug!(engine = %compressor.engine(), "compressor ready");
    runtime.block_on(handle(raw, config, &compressor))
}

/// Turn one raw request document into its response. Never fails.
pub async fn handle<C: Compressor>(
    raw: &str,
    config: &Config,
    compressor: &C,
) -> CompressResponse {
    let request = match CompressRequest::parse(raw) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable request");
            return CompressResponse::fallback(String::new(), e);
        }
    };

    match process(&request, config, compressor).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "compression failed, returning original context");
            CompressResponse::fallback(request.context, e)
        }
    }
}

async fn process<C: Compressor>(
    request: &CompressRequest,
    config: &Config,
    compressor: &C,
) -> Result<CompressResponse, AdapterError> {
    if is_below_threshold(&request.context, config.min_chars) {
        tracing::debug!(
            min_chars = config.min_chars,
            "context below threshold, skipping compression"
        );
        return Ok(CompressResponse::passthrough(request.context.clone()));
    }

    let compressed = compressor
        .compress(&request.context, request.prompt())
        .await?;
    let response = CompressResponse::from(compressed);
    tracing::info!(
        engine = %config.engine,
        original_tokens = response.original_tokens,
        compressed_tokens = response.compressed_tokens,
        ratio = response.compression_ratio,
        "context compressed"
    );
    Ok(response)
}

fn write_response<W: Write>(out: &mut W, response: &CompressResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()
}
