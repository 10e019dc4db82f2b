//! Synchronous chunking API - Chunker and ChunkIter.
//!
//! - [`Chunker`] - Holds a configuration and starts chunking sessions
//! - [`ChunkIter`] - One session over a [`std::io::Read`] source
//!
//! # Example
//!
//! ```no_run
//! use gearchunk::Chunker;
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let mut chunks = Chunker::reference().chunk(file);
//!
//! while chunks.advance() {
//!     let chunk = chunks.current().unwrap();
//!     println!("Chunk: {} bytes", chunk.len());
//! }
//! if let Some(err) = chunks.error() {
//!     return Err(err.clone().into());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Read};

use bytes::Bytes;

use super::session::{Next, READ_SIZE, Session};
use crate::cdc::RollingState;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// A chunker that turns byte sources into content-defined chunks.
///
/// `Chunker` only holds a validated [`ChunkConfig`]; every call to
/// [`chunk`](Self::chunk) starts an independent session with its own buffer
/// and rolling state.
///
/// # Example
///
/// ```
/// use gearchunk::{Chunker, ChunkConfig};
/// use std::io::Cursor;
///
/// let data = vec![7u8; 100_000];
/// let chunker = Chunker::new(ChunkConfig::new(1024, 4096, 16384)?);
/// let chunks: Vec<_> = chunker.chunk(Cursor::new(&data)).collect::<Result<_, _>>()?;
///
/// let total: usize = chunks.iter().map(|c| c.len()).sum();
/// assert_eq!(total, data.len());
/// # Ok::<(), gearchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Creates a chunker with the reference preset (2 KiB / 8 KiB / 64 KiB).
    pub fn reference() -> Self {
        Self::new(ChunkConfig::reference())
    }

    /// Starts a chunking session over `reader`.
    pub fn chunk<R: Read>(&self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, self.config)
    }

    /// Chunks an in-memory buffer.
    ///
    /// Boundaries are identical to those produced by [`chunk`](Self::chunk)
    /// over the same bytes. Chunks are zero-copy slices of `data`.
    ///
    /// # Example
    ///
    /// ```
    /// use gearchunk::Chunker;
    ///
    /// let chunks = Chunker::reference().chunk_bytes(&b"hello world"[..]);
    ///
    /// assert_eq!(chunks.len(), 1);
    /// assert_eq!(chunks[0].len(), 11);
    /// ```
    pub fn chunk_bytes(&self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let data = data.into();
        let mut chunks = Vec::new();
        let mut state = RollingState::new();
        let mut start = 0usize;

        while start < data.len() {
            let rest = &data[start..];
            let len = state
                .find_boundary(rest, &self.config)
                .unwrap_or(rest.len());
            chunks.push(Chunk::new(data.slice(start..start + len), start as u64));
            start += len;
        }

        chunks
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

/// One chunking session over a [`std::io::Read`] source.
///
/// The primary interface is pull-based:
///
/// - [`advance`](Self::advance) produces the next chunk and returns true, or
///   returns false once the input is exhausted or a read failed
/// - [`current`](Self::current) returns the chunk produced by the last
///   successful `advance`
/// - [`error`](Self::error) returns the read error that ended the session,
///   if any
///
/// A false return from `advance` is ambiguous until `error` is checked.
/// Chunks produced before a failure stay valid: each is an owned [`Bytes`]
/// handle that remains usable after later calls.
///
/// On a read error the bytes buffered for the unfinished chunk are
/// discarded, the error becomes sticky and no further chunks are produced.
/// [`io::ErrorKind::Interrupted`] is retried, as the `Read` contract intends.
///
/// `ChunkIter` also implements [`Iterator`], yielding each chunk, then the
/// terminal error once, then `None`.
pub struct ChunkIter<R> {
    reader: R,
    session: Session,
    scratch: Box<[u8]>,
    current: Option<Chunk>,
    error: Option<ChunkError>,
    error_reported: bool,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    /// Starts a session over `reader` with `config`.
    pub fn new(reader: R, config: ChunkConfig) -> Self {
        Self {
            reader,
            session: Session::new(config),
            scratch: vec![0u8; READ_SIZE].into_boxed_slice(),
            current: None,
            error: None,
            error_reported: false,
            finished: false,
        }
    }

    /// Starts a session with the reference preset (2 KiB / 8 KiB / 64 KiB).
    pub fn reference(reader: R) -> Self {
        Self::new(reader, ChunkConfig::reference())
    }

    /// Produces the next chunk.
    ///
    /// Returns true if [`current`](Self::current) now holds a new chunk,
    /// false at end of input or after a read error.
    pub fn advance(&mut self) -> bool {
        self.current = None;
        if self.finished {
            return false;
        }

        loop {
            match self.session.next_chunk() {
                Next::Chunk(chunk) => {
                    self.current = Some(chunk);
                    return true;
                }
                Next::Done => {
                    self.finished = true;
                    return false;
                }
                Next::NeedInput => {}
            }

            match self.reader.read(&mut self.scratch) {
                Ok(n) => self.session.feed(&self.scratch[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    let discarded = self.session.abort();
                    tracing::warn!(
                        offset = self.session.offset(),
                        discarded,
                        error = %e,
                        "read failed, chunking stopped"
                    );
                    self.error = Some(e.into());
                    self.finished = true;
                    return false;
                }
            }
        }
    }

    /// Returns the chunk produced by the last successful
    /// [`advance`](Self::advance).
    pub fn current(&self) -> Option<&Chunk> {
        self.current.as_ref()
    }

    /// Returns the error that ended the session, if any.
    pub fn error(&self) -> Option<&ChunkError> {
        self.error.as_ref()
    }

    /// Returns the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.session.offset()
    }

    /// Returns the configuration of this session.
    pub fn config(&self) -> &ChunkConfig {
        self.session.config()
    }

    /// Consumes the session and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            return self.current.clone().map(Ok);
        }
        if self.error_reported {
            return None;
        }
        let err = self.error.clone()?;
        self.error_reported = true;
        Some(Err(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Serves `data` in reads of at most `step` bytes, then fails.
    struct FailingReader {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "source failed"));
            }
            let n = buf.len().min(self.step).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Returns `Interrupted` before every successful read.
    struct InterruptingReader {
        inner: Cursor<Vec<u8>>,
        interrupt: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.inner.read(buf)
        }
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len as u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 11) as u8)
            .collect()
    }

    #[test]
    fn test_chunker_empty() {
        let chunker = Chunker::reference();
        assert!(chunker.chunk_bytes(&b""[..]).is_empty());

        let mut iter = chunker.chunk(Cursor::new(Vec::new()));
        assert!(!iter.advance());
        assert!(iter.current().is_none());
        assert!(iter.error().is_none());
    }

    #[test]
    fn test_chunker_small_data() {
        let chunker = Chunker::new(ChunkConfig::new(4, 16, 64).unwrap());
        let chunks = chunker.chunk_bytes(vec![0xAAu8; 3]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 3);
    }

    #[test]
    fn test_advance_current_contract() {
        let data = sample(50_000);
        let chunker = Chunker::new(ChunkConfig::new(256, 1024, 4096).unwrap());
        let mut iter = chunker.chunk(Cursor::new(data.clone()));

        let mut rebuilt = Vec::new();
        while iter.advance() {
            let chunk = iter.current().unwrap();
            assert_eq!(chunk.offset, rebuilt.len() as u64);
            rebuilt.extend_from_slice(&chunk.data);
        }

        assert!(iter.error().is_none());
        assert!(iter.current().is_none());
        assert!(!iter.advance(), "terminal session stays terminal");
        assert_eq!(rebuilt, data);
        assert_eq!(iter.offset(), data.len() as u64);
    }

    #[test]
    fn test_stream_matches_in_memory() {
        let data = sample(200_000);
        let chunker = Chunker::new(ChunkConfig::new(512, 2048, 8192).unwrap());

        let streamed: Vec<_> = chunker
            .chunk(Cursor::new(data.clone()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let in_memory = chunker.chunk_bytes(data);

        assert_eq!(streamed, in_memory);
    }

    #[test]
    fn test_chunk_offsets() {
        let chunker = Chunker::new(ChunkConfig::new(4, 16, 64).unwrap());
        let chunks = chunker.chunk_bytes(sample(1000));

        let mut expected_offset = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.offset, expected_offset);
            expected_offset += chunk.len() as u64;
        }
        assert_eq!(expected_offset, 1000);
    }

    #[test]
    fn test_read_error_is_sticky() {
        let config = ChunkConfig::new(64, 256, 1024).unwrap();
        let data = sample(10_000);
        let reader = FailingReader {
            data: data.clone(),
            pos: 0,
            step: 100,
        };
        let mut iter = ChunkIter::new(reader, config);

        let mut emitted = Vec::new();
        while iter.advance() {
            emitted.push(iter.current().cloned().unwrap());
        }

        let err = iter.error().expect("read error must be reported");
        assert_eq!(err.io_error().unwrap().kind(), io::ErrorKind::BrokenPipe);

        // Everything emitted is a full chunk; the unresolved tail is dropped.
        let emitted_bytes: Vec<u8> = emitted.iter().flat_map(|c| c.data.iter().copied()).collect();
        assert_eq!(emitted_bytes, data[..emitted_bytes.len()]);
        for chunk in &emitted {
            assert!(chunk.len() >= config.min_size());
        }

        assert!(!iter.advance());
        assert!(!iter.advance());
        assert!(iter.error().is_some(), "error stays set");
    }

    #[test]
    fn test_iterator_reports_error_once() {
        let reader = FailingReader {
            data: Vec::new(),
            pos: 0,
            step: 1,
        };
        let mut iter = Chunker::reference().chunk(reader);

        assert!(matches!(iter.next(), Some(Err(ChunkError::Io(_)))));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert!(iter.error().is_some());
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let data = sample(30_000);
        let chunker = Chunker::new(ChunkConfig::new(256, 1024, 4096).unwrap());
        let reader = InterruptingReader {
            inner: Cursor::new(data.clone()),
            interrupt: false,
        };

        let chunks: Vec<_> = chunker
            .chunk(reader)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(chunks, chunker.chunk_bytes(data));
    }

    #[test]
    fn test_reference_session() {
        let iter = ChunkIter::reference(Cursor::new(Vec::new()));
        assert_eq!(*iter.config(), ChunkConfig::reference());
        assert_eq!(*Chunker::reference().config(), ChunkConfig::reference());
    }
}
