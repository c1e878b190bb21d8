//! Public types for the Venice client.

mod message;
mod model;
mod options;
mod response;

pub use message::{ContentBlock, Message, Role};
pub use model::{ModelDescriptor, ResolvedModel};
pub use options::{VeniceOptions, WebSearchMode};
pub use response::{StreamChunk, UsageChunk};
