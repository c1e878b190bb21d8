//! Venice SSE stream decoder.
//!
//! Turns the raw response body of a streaming chat completion into
//! [`StreamChunk`]s. Malformed data lines are logged and skipped; a transport
//! failure ends the stream with [`VeniceError::TransportInterrupted`], and a
//! body that ends before its first byte with [`VeniceError::EmptyBody`].

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use futures_util::stream::FusedStream;
use pin_project_lite::pin_project;
use serde::Deserialize;
use tracing::{debug, warn};

use super::sse::{LineBuffer, SseLine};
use crate::telemetry;
use crate::types::{ModelDescriptor, StreamChunk, UsageChunk};
use crate::{Result, VeniceError};

pin_project! {
    /// Decodes an SSE byte stream into [`StreamChunk`]s.
    ///
    /// The inner stream is dropped as soon as decoding ends (terminator,
    /// end of body, or read error), and in any case when the decoder itself
    /// is dropped.
    pub struct VeniceStreamDecoder<S> {
        #[pin]
        inner: Option<S>,
        buffer: LineBuffer,
        // Chunks decoded from the current line, not yet yielded
        pending: VecDeque<StreamChunk>,
        model: ModelDescriptor,
        received_bytes: bool,
        finished: bool,
    }
}

impl<S> VeniceStreamDecoder<S> {
    /// Decode `inner`, pricing usage records with `model`.
    pub fn new(inner: S, model: ModelDescriptor) -> Self {
        Self {
            inner: Some(inner),
            buffer: LineBuffer::new(),
            pending: VecDeque::new(),
            model,
            received_bytes: false,
            finished: false,
        }
    }
}

impl<S, B, E> Stream for VeniceStreamDecoder<S>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    type Item = Result<StreamChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            // Drain complete lines until one produces output or ends the stream
            while let Some(line) = this.buffer.next_line() {
                if decode_line(&line, this.model, this.pending) == LineOutcome::Done {
                    debug!(
                        discarded_bytes = this.buffer.pending_len(),
                        "stream terminator received"
                    );
                    *this.finished = true;
                    this.buffer.clear();
                    this.inner.set(None);
                    break;
                }
                if !this.pending.is_empty() {
                    break;
                }
            }
            if !this.pending.is_empty() || *this.finished {
                continue;
            }

            let Some(inner) = this.inner.as_mut().as_pin_mut() else {
                *this.finished = true;
                continue;
            };
            match inner.poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    let bytes = bytes.as_ref();
                    *this.received_bytes |= !bytes.is_empty();
                    this.buffer.extend(bytes);
                }
                Poll::Ready(Some(Err(e))) => {
                    warn!(error = %e, "stream read failed");
                    *this.finished = true;
                    this.buffer.clear();
                    this.inner.set(None);
                    return Poll::Ready(Some(Err(VeniceError::TransportInterrupted(
                        e.to_string(),
                    ))));
                }
                Poll::Ready(None) if !*this.received_bytes => {
                    warn!("response body ended before any data");
                    *this.finished = true;
                    this.inner.set(None);
                    return Poll::Ready(Some(Err(VeniceError::EmptyBody)));
                }
                Poll::Ready(None) => {
                    if this.buffer.pending_len() > 0 {
                        debug!(
                            discarded_bytes = this.buffer.pending_len(),
                            "dropping unterminated trailing line"
                        );
                    }
                    *this.finished = true;
                    this.buffer.clear();
                    this.inner.set(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S, B, E> FusedStream for VeniceStreamDecoder<S>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    fn is_terminated(&self) -> bool {
        self.finished && self.pending.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Done,
}

/// Decode one complete line, appending any resulting chunks to `out`.
fn decode_line(
    line: &[u8],
    model: &ModelDescriptor,
    out: &mut VecDeque<StreamChunk>,
) -> LineOutcome {
    let line = match std::str::from_utf8(line) {
        Ok(line) => line,
        Err(e) => {
            warn!(error = %e, "skipping SSE line with invalid UTF-8");
            metrics::counter!(telemetry::LINE_PARSE_ERRORS_TOTAL).increment(1);
            return LineOutcome::Continue;
        }
    };

    let payload = match SseLine::classify(line) {
        SseLine::Data(payload) => payload,
        SseLine::Done => return LineOutcome::Done,
        SseLine::Skip => return LineOutcome::Continue,
    };

    let event: ChunkPayload = match serde_json::from_str(payload) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, payload, "skipping malformed SSE data line");
            metrics::counter!(telemetry::LINE_PARSE_ERRORS_TOTAL).increment(1);
            return LineOutcome::Continue;
        }
    };

    if let Some(text) = event
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .filter(|t| !t.is_empty())
    {
        out.push_back(StreamChunk::Text { text });
    }

    if let Some(usage) = event.usage {
        out.push_back(StreamChunk::Usage(usage.into_chunk(model)));
    }

    LineOutcome::Continue
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Vec<ChoicePayload>,
    #[serde(default)]
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct ChoicePayload {
    #[serde(default)]
    delta: Option<DeltaPayload>,
}

#[derive(Debug, Deserialize)]
struct DeltaPayload {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    #[serde(default)]
    prompt_tokens: Option<u64>,
    #[serde(default)]
    completion_tokens: Option<u64>,
    #[serde(default)]
    prompt_tokens_details: Option<PromptTokensDetails>,
}

#[derive(Debug, Deserialize)]
struct PromptTokensDetails {
    #[serde(default)]
    cached_tokens: Option<u64>,
}

impl UsagePayload {
    fn into_chunk(self, model: &ModelDescriptor) -> UsageChunk {
        let input_tokens = self.prompt_tokens.unwrap_or(0);
        let output_tokens = self.completion_tokens.unwrap_or(0);
        UsageChunk {
            input_tokens,
            output_tokens,
            cache_read_tokens: self
                .prompt_tokens_details
                .and_then(|d| d.cached_tokens)
                .unwrap_or(0),
            cache_write_tokens: 0,
            total_cost: model.cost(input_tokens, output_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelDescriptor {
        ModelDescriptor::new("m", 1, 1).with_pricing(1.0, 2.0)
    }

    fn decode(line: &str) -> (LineOutcome, Vec<StreamChunk>) {
        let mut out = VecDeque::new();
        let outcome = decode_line(line.as_bytes(), &model(), &mut out);
        (outcome, out.into_iter().collect())
    }

    #[test]
    fn text_delta() {
        let (outcome, chunks) = decode(r#"data: {"choices":[{"delta":{"content":"hi"}}]}"#);
        assert_eq!(outcome, LineOutcome::Continue);
        assert_eq!(chunks, vec![StreamChunk::text("hi")]);
    }

    #[test]
    fn empty_and_null_content_are_ignored() {
        assert!(decode(r#"data: {"choices":[{"delta":{"content":""}}]}"#).1.is_empty());
        assert!(decode(r#"data: {"choices":[{"delta":{"content":null}}]}"#).1.is_empty());
        assert!(decode(r#"data: {"choices":[{"delta":{}}]}"#).1.is_empty());
        assert!(decode(r#"data: {"choices":[]}"#).1.is_empty());
    }

    #[test]
    fn text_before_usage_on_same_line() {
        let (_, chunks) = decode(
            r#"data: {"choices":[{"delta":{"content":"x"}}],"usage":{"prompt_tokens":3,"completion_tokens":4,"prompt_tokens_details":{"cached_tokens":2}}}"#,
        );
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], StreamChunk::text("x"));
        let usage = chunks[1].as_usage().unwrap();
        assert_eq!(usage.input_tokens, 3);
        assert_eq!(usage.output_tokens, 4);
        assert_eq!(usage.cache_read_tokens, 2);
        assert_eq!(usage.cache_write_tokens, 0);
        assert!((usage.total_cost - (3.0 + 8.0) / 1e6).abs() < 1e-15);
    }

    #[test]
    fn missing_usage_figures_default_to_zero() {
        let (_, chunks) = decode(r#"data: {"usage":{}}"#);
        assert_eq!(chunks, vec![StreamChunk::Usage(UsageChunk::default())]);
    }

    #[test]
    fn null_usage_is_not_a_usage_record() {
        let (_, chunks) = decode(r#"data: {"choices":[],"usage":null}"#);
        assert!(chunks.is_empty());
    }

    #[test]
    fn malformed_payloads_are_skipped() {
        assert_eq!(decode("data: {not json").0, LineOutcome::Continue);
        assert!(decode("data: {not json").1.is_empty());
        assert!(decode("data: 42").1.is_empty());
        let mut out = VecDeque::new();
        assert_eq!(
            decode_line(b"data: \xff\xfe", &model(), &mut out),
            LineOutcome::Continue
        );
        assert!(out.is_empty());
    }

    #[test]
    fn terminator_ends_decoding() {
        assert_eq!(decode("data: [DONE]"), (LineOutcome::Done, vec![]));
    }
}
