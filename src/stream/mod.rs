//! Streaming response decoding.
//!
//! [`VeniceStreamDecoder`] consumes the response body of a streaming chat
//! completion and yields [`StreamChunk`](crate::StreamChunk)s:
//!
//! ```rust
//! use futures_util::{StreamExt, stream};
//! use venice::catalog;
//! use venice::stream::VeniceStreamDecoder;
//!
//! # tokio_test::block_on(async {
//! let body = stream::iter(vec![
//!     Ok::<_, std::io::Error>(&b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n"[..]),
//!     Ok(&b"data: [DONE]\n"[..]),
//! ]);
//! let chunks: Vec<_> = VeniceStreamDecoder::new(body, catalog::default_model().info)
//!     .collect()
//!     .await;
//! assert_eq!(chunks.len(), 1);
//! # });
//! ```

mod decoder;
mod sse;

pub use decoder::VeniceStreamDecoder;
