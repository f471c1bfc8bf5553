//! Local sentence-extraction compressor, no network required

use regex::Regex;
use squeeze_core::{char_len, CompressError, Compressed, DEFAULT_MAX_TOKENS};
use std::sync::OnceLock;

use crate::Compressor;

/// Below this many characters an extraction is considered a miss
const MIN_EXTRACT_CHARS: usize = 50;

const IMPORTANT_TERMS: &[&str] = &[
    "result",
    "finding",
    "conclude",
    "demonstrate",
    "significant",
    "propose",
    "method",
    "approach",
    "contribute",
    "novel",
    "improve",
    "outperform",
    "achieve",
    "show",
    "suggest",
    "hypothesis",
    "experiment",
    "evaluate",
    "analysis",
    "model",
];

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^.!?\n]+(?:[.!?\n]+|$)").expect("valid sentence regex"))
}

/// Picks the highest-scoring sentences until the character budget is spent
#[derive(Debug, Clone)]
pub struct ExtractiveCompressor {
    pub max_tokens: usize,
}

impl Default for ExtractiveCompressor {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug)]
struct Scored<'a> {
    text: &'a str,
    score: f64,
    index: usize,
}

impl ExtractiveCompressor {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn extract(&self, context: &str, prompt: &str) -> Compressed {
        let original_tokens = ceil_tokens(context);
        if context.trim().is_empty() {
            return Compressed {
                content: context.to_string(),
                original_tokens,
                compressed_tokens: original_tokens,
                ratio: None,
            };
        }

        let max_chars = self.max_tokens.saturating_mul(4);
        let sentences = split_sentences(context);
        let keywords = prompt_keywords(prompt);

        let mut scored: Vec<Scored> = sentences
            .iter()
            .enumerate()
            .map(|(index, s)| Scored {
                text: *s,
                score: score_sentence(s, index, sentences.len(), &keywords),
                index,
            })
            .collect();

        // Stable: ties keep document order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut selected = Vec::new();
        let mut used_chars = 0;
        for s in scored {
            if s.score <= 0.0 {
                continue;
            }
            let len = char_len(s.text);
            if used_chars + len > max_chars {
                break;
            }
            used_chars += len + 1;
            selected.push(s);
        }
        selected.sort_by_key(|s| s.index);

        let joined = selected
            .iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ");
        let joined = joined.trim();

        let content = if char_len(joined) > MIN_EXTRACT_CHARS {
            joined.to_string()
        } else {
            context.chars().take(max_chars).collect()
        };

        let compressed_tokens = ceil_tokens(&content);
        let ratio = (original_tokens > 0).then(|| compressed_tokens as f64 / original_tokens as f64);

        Compressed {
            content,
            original_tokens,
            compressed_tokens,
            ratio,
        }
    }
}

impl Compressor for ExtractiveCompressor {
    async fn compress(&self, context: &str, prompt: &str) -> Result<Compressed, CompressError> {
        Ok(self.extract(context, prompt))
    }
}

fn ceil_tokens(text: &str) -> u64 {
    char_len(text).div_ceil(4) as u64
}

fn split_sentences(text: &str) -> Vec<&str> {
    let sentences: Vec<&str> = sentence_pattern()
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        vec![text.trim()]
    } else {
        sentences
    }
}

fn prompt_keywords(prompt: &str) -> Vec<String> {
    prompt
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| char_len(w) > 3)
        .collect()
}

fn score_sentence(sentence: &str, index: usize, total: usize, keywords: &[String]) -> f64 {
    if char_len(sentence) < 10 {
        return 0.0;
    }

    let mut score = 0.0;

    // Openings and closings carry the most weight
    if index < 3 {
        score += (3 - index) as f64;
    }
    if index + 2 >= total {
        score += 1.5;
    }

    let word_count = sentence.split_whitespace().count();
    if (10..=40).contains(&word_count) {
        score += 2.0;
    } else if word_count >= 5 {
        score += 1.0;
    }

    let lower = sentence.to_lowercase();
    score += 1.5 * IMPORTANT_TERMS.iter().filter(|t| lower.contains(*t)).count() as f64;
    score += 2.0 * keywords.iter().filter(|k| lower.contains(k.as_str())).count() as f64;

    if word_count < 5 {
        score -= 2.0;
    }

    score
}
