//! Streaming chunker.
//!
//! - [`Chunker`] - Configured factory for chunking sessions
//! - [`ChunkIter`] - Pull-based session over a [`std::io::Read`] source

mod iter;
pub(crate) mod session;

pub use iter::{ChunkIter, Chunker};
