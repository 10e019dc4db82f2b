//! Chunk types.
//!
//! - [`Chunk`] - Content-defined chunk with its bytes and stream offset

mod data;

pub use data::Chunk;
