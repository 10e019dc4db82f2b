//! I/O-free chunking state machine.
//!
//! [`Session`] owns the stream buffer and rolling state for one traversal of
//! one input. It never touches the source itself: a front-end asks it for the
//! next chunk, and when it answers [`Next::NeedInput`] the front-end reads
//! from its source and hands the bytes over with [`Session::feed`]. The sync
//! [`ChunkIter`](super::ChunkIter) and the async stream both drive it this
//! way, so they produce identical boundaries.

use bytes::BytesMut;

use crate::cdc::RollingState;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;

/// Number of bytes requested from the source per read.
pub(crate) const READ_SIZE: usize = 8 * 1024;

/// Outcome of asking the session for its next chunk.
#[derive(Debug)]
pub(crate) enum Next {
    /// A chunk was committed.
    Chunk(Chunk),
    /// Every buffered byte has been scanned; feed more input.
    NeedInput,
    /// The source is exhausted and nothing is pending.
    Done,
}

#[derive(Debug)]
pub(crate) struct Session {
    config: ChunkConfig,
    state: RollingState,
    /// Bytes read but not yet emitted. `buffer[..scanned]` has already been
    /// fed to `state`.
    buffer: BytesMut,
    scanned: usize,
    offset: u64,
    chunks: u64,
    eof: bool,
}

impl Session {
    pub(crate) fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            state: RollingState::new(),
            // Grows on demand; max_size may be far larger than any real input.
            buffer: BytesMut::with_capacity(READ_SIZE),
            scanned: 0,
            offset: 0,
            chunks: 0,
            eof: false,
        }
    }

    /// Scans unscanned buffered bytes and commits a chunk if one is complete.
    pub(crate) fn next_chunk(&mut self) -> Next {
        let pending = &self.buffer[self.scanned..];
        if let Some(len) = self.state.find_boundary(pending, &self.config) {
            let len = self.scanned + len;
            return Next::Chunk(self.emit(len));
        }
        self.scanned = self.buffer.len();

        if !self.eof {
            return Next::NeedInput;
        }

        if self.buffer.is_empty() {
            tracing::debug!(
                chunks = self.chunks,
                bytes = self.offset,
                "end of input reached"
            );
            return Next::Done;
        }

        // Source ran dry before a boundary: flush the tail as the final chunk.
        let len = self.buffer.len();
        Next::Chunk(self.emit(len))
    }

    /// Appends bytes read from the source. An empty slice marks end of input.
    pub(crate) fn feed(&mut self, data: &[u8]) {
        if data.is_empty() {
            self.eof = true;
        } else {
            self.buffer.extend_from_slice(data);
        }
    }

    /// Drops all unresolved bytes after a read failure and returns how many
    /// were discarded.
    pub(crate) fn abort(&mut self) -> usize {
        let discarded = self.buffer.len();
        self.buffer.clear();
        self.scanned = 0;
        self.state.reset();
        self.eof = true;
        discarded
    }

    /// Returns the stream offset of the next chunk.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn config(&self) -> &ChunkConfig {
        &self.config
    }

    fn emit(&mut self, len: usize) -> Chunk {
        let data = self.buffer.split_to(len).freeze();
        let chunk = Chunk::new(data, self.offset);

        self.state.reset();
        self.scanned = 0;
        self.offset += len as u64;
        self.chunks += 1;

        tracing::trace!(offset = chunk.offset, len, "chunk emitted");
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(session: &mut Session, input: &[u8], read_size: usize) -> Vec<Chunk> {
        let mut reads = input.chunks(read_size);
        let mut out = Vec::new();
        loop {
            match session.next_chunk() {
                Next::Chunk(chunk) => out.push(chunk),
                Next::NeedInput => session.feed(reads.next().unwrap_or(&[])),
                Next::Done => return out,
            }
        }
    }

    #[test]
    fn test_empty_input_is_done() {
        let mut session = Session::new(ChunkConfig::new(4, 16, 64).unwrap());
        assert!(matches!(session.next_chunk(), Next::NeedInput));
        session.feed(&[]);
        assert!(matches!(session.next_chunk(), Next::Done));
        assert!(matches!(session.next_chunk(), Next::Done));
    }

    #[test]
    fn test_tail_flushed_once() {
        let mut session = Session::new(ChunkConfig::new(4, 16, 64).unwrap());
        session.feed(&[0xAA; 3]);
        assert!(matches!(session.next_chunk(), Next::NeedInput));
        session.feed(&[]);

        match session.next_chunk() {
            Next::Chunk(chunk) => {
                assert_eq!(chunk.len(), 3);
                assert_eq!(chunk.offset, 0);
            }
            other => panic!("expected final chunk, got {:?}", other),
        }
        assert!(matches!(session.next_chunk(), Next::Done));
        assert_eq!(session.offset(), 3);
    }

    #[test]
    fn test_read_size_does_not_move_boundaries() {
        let config = ChunkConfig::new(16, 64, 256).unwrap();
        let data: Vec<u8> = (0..10_000u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();

        let bulk = drain(&mut Session::new(config), &data, data.len());
        let bytewise = drain(&mut Session::new(config), &data, 1);
        let odd = drain(&mut Session::new(config), &data, 37);

        assert_eq!(bulk, bytewise);
        assert_eq!(bulk, odd);
    }

    #[test]
    fn test_buffer_stays_bounded() {
        let config = ChunkConfig::new(64, 256, 1024).unwrap();
        let mut session = Session::new(config);
        let data = vec![0u8; 100_000];

        for read in data.chunks(READ_SIZE) {
            session.feed(read);
            while let Next::Chunk(chunk) = session.next_chunk() {
                assert!(chunk.len() <= config.max_size());
            }
            assert!(session.buffer.len() < config.max_size() + READ_SIZE);
        }
    }

    #[test]
    fn test_huge_max_size_allocates_lazily() {
        for config in [
            ChunkConfig::new(2048, 8192, usize::MAX).unwrap(),
            ChunkConfig::new(1, 1 << 40, 1 << 42).unwrap(),
        ] {
            let session = Session::new(config);
            assert!(session.buffer.capacity() < config.max_size());

            let data = vec![1u8; 100];
            let chunks = drain(&mut Session::new(config), &data, 37);
            let total: usize = chunks.iter().map(Chunk::len).sum();
            assert_eq!(total, data.len());
        }
    }

    #[test]
    fn test_abort_discards_pending() {
        let mut session = Session::new(ChunkConfig::new(4, 16, 64).unwrap());
        session.feed(&[1, 2, 3]);
        assert!(matches!(session.next_chunk(), Next::NeedInput));

        assert_eq!(session.abort(), 3);
        assert!(matches!(session.next_chunk(), Next::Done));
        assert_eq!(session.offset(), 0);
    }
}
