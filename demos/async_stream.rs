//! Async streaming chunking example.
//!
//! Chunks a tokio file through the runtime-agnostic `chunk_async` stream.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io -- /path/to/file

use futures_util::StreamExt;
use gearchunk::{ChunkConfig, chunk_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let file = tokio::fs::File::open(&path).await?;
    let mut stream = chunk_async(file.compat(), ChunkConfig::reference());

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "  Chunk {}: offset={:>8}, len={:>8}",
            total_chunks,
            chunk.offset,
            chunk.len()
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    Ok(())
}
