//! Venice - streaming client for the Venice.ai chat API
//!
//! This crate sends chat conversations to Venice's OpenAI-compatible
//! endpoint and decodes the Server-Sent-Events response into a stream of
//! text and usage chunks, pricing usage from a static model catalog.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use venice::providers::VeniceHandler;
//! use venice::{Message, StreamChunk, VeniceOptions, WebSearchMode};
//!
//! #[tokio::main]
//! async fn main() -> venice::Result<()> {
//!     let handler = VeniceHandler::new(
//!         VeniceOptions::new("your-venice-key")
//!             .model("qwen3-4b")
//!             .web_search(WebSearchMode::Auto),
//!     )?;
//!
//!     let mut stream = handler
//!         .create_message(
//!             "You are a helpful assistant.",
//!             &[Message::user("What is the capital of France?")],
//!         )
//!         .await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         match chunk? {
//!             StreamChunk::Text { text } => print!("{text}"),
//!             StreamChunk::Usage(usage) => println!("\n${:.6}", usage.total_cost),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod providers;
pub mod settings;
pub mod stream;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use error::{Result, VeniceError};
pub use providers::{ApiHandler, RetryConfig, RetryingHandler, VeniceHandler};
pub use settings::{Mode, VeniceSettings};

// Re-export all types
pub use types::{
    ContentBlock, Message, ModelDescriptor, ResolvedModel, Role, StreamChunk, UsageChunk,
    VeniceOptions, WebSearchMode,
};
