//! Reference preset example.
//!
//! Prints chunk lengths with the 2 KiB / 8 KiB / 64 KiB reference preset,
//! for comparison with other FastCDC implementations.
//!
//! Run with:
//!     cargo run --example reference -- tests/testdata/testfile.bin

use std::env;
use std::fs::File;

use gearchunk::ChunkIter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/testdata/testfile.bin".to_string());

    let mut chunker = ChunkIter::reference(File::open(&path)?);
    let mut n_chunks = 0;
    let mut n_bytes = 0;

    while chunker.advance() {
        let chunk = chunker.current().expect("advance returned true");
        println!("{}", chunk.len());
        n_chunks += 1;
        n_bytes += chunk.len();
    }
    if let Some(err) = chunker.error() {
        return Err(err.clone().into());
    }

    println!("read {} chunks with {} bytes total", n_chunks, n_bytes);
    Ok(())
}
