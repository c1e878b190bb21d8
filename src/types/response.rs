//! Streaming chunk types

use serde::{Deserialize, Serialize};

/// Items yielded by a streaming message call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    /// Incremental text content
    Text { text: String },

    /// Token usage and cost (typically at end of stream)
    Usage(UsageChunk),
}

impl StreamChunk {
    pub fn text(text: impl Into<String>) -> Self {
        StreamChunk::Text { text: text.into() }
    }

    /// The text payload, if this is a text chunk
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StreamChunk::Text { text } => Some(text),
            StreamChunk::Usage(_) => None,
        }
    }

    /// The usage payload, if this is a usage chunk
    pub fn as_usage(&self) -> Option<&UsageChunk> {
        match self {
            StreamChunk::Usage(usage) => Some(usage),
            StreamChunk::Text { .. } => None,
        }
    }
}

/// Token usage statistics with the locally computed cost
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageChunk {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_read_tokens: u64,
    pub cache_write_tokens: u64,
    /// USD
    pub total_cost: f64,
}
