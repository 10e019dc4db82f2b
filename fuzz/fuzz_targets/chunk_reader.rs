#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use gearchunk::{ChunkConfig, ChunkIter, Chunker};

/// Serves the input in reads whose sizes come from the fuzzer.
struct Jagged<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
    turn: usize,
}

impl Read for Jagged<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = match self.sizes.get(self.turn % self.sizes.len().max(1)) {
            Some(&n) => n as usize + 1,
            None => buf.len(),
        };
        self.turn += 1;
        let n = buf.len().min(want).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (data, sizes) = input;

    for config in [
        ChunkConfig::new(4, 16, 64).unwrap(),
        ChunkConfig::new(64, 256, 1024).unwrap(),
        ChunkConfig::reference(),
    ] {
        let expected = Chunker::new(config).chunk_bytes(data.clone());

        let reader = Jagged {
            data: &data,
            sizes: &sizes,
            turn: 0,
        };
        let mut chunker = ChunkIter::new(reader, config);
        let mut streamed = Vec::new();
        while chunker.advance() {
            streamed.push(chunker.current().unwrap().clone());
        }

        // Boundaries do not depend on how the input was split into reads
        assert!(chunker.error().is_none());
        assert_eq!(streamed, expected);
        assert_eq!(chunker.offset(), data.len() as u64);

        // Exhausted sessions stay exhausted
        assert!(!chunker.advance());
        assert!(chunker.current().is_none());
    }
});
