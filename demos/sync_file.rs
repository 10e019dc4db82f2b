//! File chunking example.
//!
//! Run with:
//!     RUST_LOG=gearchunk=debug cargo run --example sync_file -- /path/to/file

use std::env;
use std::fs::File;

use gearchunk::{ChunkConfig, Chunker};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Chunking file: {}\n", path);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    // Custom config for larger chunks
    let config = ChunkConfig::new(
        8 * 1024,   // min: 8 KiB
        32 * 1024,  // avg: 32 KiB
        128 * 1024, // max: 128 KiB
    )?;

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    for chunk in Chunker::new(config).chunk(file) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {}: offset={:>10}, len={:>8}",
            total_chunks,
            chunk.offset,
            chunk.len()
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
