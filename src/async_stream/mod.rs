//! Async streaming support for chunking.
//!
//! Runtime-agnostic chunking over `futures_io::AsyncRead`:
//!
//! - [`chunk_async`] - Creates an async stream of chunks from an async reader
//! - [`ChunkStream`] - The stream type it returns
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{ChunkStream, chunk_async};
