//! Basic synchronous chunking example.
//!
//! Run with:
//!     cargo run --example sync_basic

use std::io::Cursor;

use gearchunk::{ChunkConfig, Chunker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pseudo-random sample data
    let mut x = 0x2545_F491_4F6C_DD1Du64;
    let data: Vec<u8> = (0..1024 * 1024)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x as u8
        })
        .collect();

    let config = ChunkConfig::new(
        2 * 1024,  // min: 2 KiB
        8 * 1024,  // avg: 8 KiB
        32 * 1024, // max: 32 KiB
    )?;

    println!("Chunking {} bytes of data...\n", data.len());

    let mut chunks = Chunker::new(config).chunk(Cursor::new(&data));
    let mut total_chunks = 0;
    let mut total_bytes = 0;

    while chunks.advance() {
        let chunk = chunks.current().expect("advance returned true");
        total_chunks += 1;
        total_bytes += chunk.len();

        if total_chunks <= 10 {
            println!(
                "Chunk {}: offset={}, len={}",
                total_chunks,
                chunk.offset,
                chunk.len()
            );
        }
    }
    if let Some(err) = chunks.error() {
        return Err(err.clone().into());
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
