#![no_main]

use libfuzzer_sys::fuzz_target;
use gearchunk::{ChunkConfig, Chunker};

fuzz_target!(|data: Vec<u8>| {
    let configs = [
        // Small chunks
        ChunkConfig::new(4, 16, 64).unwrap(),
        // Medium chunks
        ChunkConfig::new(64, 256, 1024).unwrap(),
        // Large chunks
        ChunkConfig::new(256, 4096, 16384).unwrap(),
        // Reference preset
        ChunkConfig::reference(),
    ];

    for config in configs {
        let chunks = Chunker::new(config).chunk_bytes(data.clone());

        // Bounds: only the final chunk may fall short of min_size
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= config.max_size());
            if i < chunks.len() - 1 {
                assert!(chunk.len() >= config.min_size());
            }
        }

        // Partition: offsets are contiguous and the bytes reassemble the input
        let mut rebuilt = Vec::with_capacity(data.len());
        for chunk in &chunks {
            assert_eq!(chunk.offset, rebuilt.len() as u64);
            rebuilt.extend_from_slice(&chunk.data);
        }
        assert_eq!(rebuilt, data);

        // Determinism
        assert_eq!(chunks, Chunker::new(config).chunk_bytes(data.clone()));
    }
});
