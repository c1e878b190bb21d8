//! Provider trait for streaming message handlers.
//!
//! Callers talk to a handler through [`ApiHandler`] rather than a concrete
//! client type. This enables decorators such as
//! [`RetryingHandler`](super::retry::RetryingHandler) and test doubles.
//!
//! # Error Semantics
//!
//! `create_message` resolves only once the request has been accepted. Every
//! error it returns means no chunk was produced. Errors yielded *by the
//! stream* mean the body failed after the request was accepted: either it
//! was cut off part way, or it carried no bytes at all.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::Result;
use crate::types::{Message, ResolvedModel, StreamChunk};

/// Boxed stream of decoded chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// A chat backend that streams responses.
#[async_trait]
pub trait ApiHandler: Send + Sync {
    /// Handler name for logging/debugging.
    fn name(&self) -> &str;

    /// Send the conversation and return the response as a chunk stream.
    async fn create_message(&self, system_prompt: &str, messages: &[Message])
    -> Result<ChunkStream>;

    /// The model requests are sent to.
    fn model(&self) -> ResolvedModel;
}
