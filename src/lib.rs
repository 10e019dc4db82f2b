//! gearchunk
//!
//! Streaming Content-Defined Chunking (CDC) for Rust.
//!
//! `gearchunk` splits a byte stream into variable-length chunks whose
//! boundaries depend on local content, so an edit only disturbs the chunks
//! around it. Boundaries come from a gear rolling hash with FastCDC
//! normalized chunking (a strict mask below the average size, a loose one
//! above it) and hard minimum and maximum sizes.
//!
//! The reference preset ([`ChunkConfig::reference`], 2 KiB / 8 KiB / 64 KiB)
//! uses the gear table and mask widths of the reference FastCDC chunker; its
//! golden lengths are checked when `tests/testdata/testfile.bin` is present.
//!
//! The crate intentionally:
//! - does NOT open files or manage paths
//! - does NOT hash, deduplicate or persist chunks
//! - does NOT chunk a single stream in parallel
//!
//! It only does one thing: **Read bytes → yield chunks**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use gearchunk::{Chunker, ChunkError};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let mut chunks = Chunker::reference().chunk(file);
//!
//!     while chunks.advance() {
//!         let chunk = chunks.current().unwrap();
//!         println!("chunk {} bytes @ {}", chunk.len(), chunk.offset);
//!     }
//!     if let Some(err) = chunks.error() {
//!         return Err(err.clone());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use gearchunk::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), gearchunk::ChunkError> {
//!     let mut stream = chunk_async(reader, ChunkConfig::reference());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdc;
mod chunk;
mod chunker;
mod config;
mod error;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use cdc::{GEAR_TABLE, RollingState, gear};
pub use chunk::Chunk;
pub use chunker::{ChunkIter, Chunker};
pub use config::{
    ChunkConfig, DEFAULT_NORMALIZATION_LEVEL, REFERENCE_AVG_SIZE, REFERENCE_MAX_SIZE,
    REFERENCE_MIN_SIZE,
};
pub use error::ChunkError;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};
