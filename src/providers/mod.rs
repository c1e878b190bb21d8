//! Venice handler, its retry decorator, and the shared handler trait.

pub mod retry;
pub mod traits;
pub mod venice;
mod venice_models;

pub use retry::{RetryConfig, RetryingHandler, with_retry};
pub use traits::{ApiHandler, ChunkStream};
pub use venice::{
    ChatRequest, DEFAULT_BASE_URL, StreamOptions, VeniceHandler, VeniceParameters,
};
pub use venice_models::{DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_TOKENS};
