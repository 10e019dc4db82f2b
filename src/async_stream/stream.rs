//! Async stream adapter for chunking.
//!
//! [`ChunkStream`] drives the same session core as
//! [`ChunkIter`](crate::ChunkIter) from a `futures_io::AsyncRead`, so both
//! produce identical chunk boundaries. It is runtime-agnostic.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use gearchunk::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R) -> Result<(), gearchunk::ChunkError> {
//!     let stream = chunk_async(reader, ChunkConfig::reference());
//!     futures_util::pin_mut!(stream);
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::chunker::session::{Next, READ_SIZE, Session};
use crate::config::ChunkConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// Yields each chunk, then the terminal read error once (if any), then
    /// ends. A read error discards the unfinished chunk, as with
    /// [`ChunkIter`](crate::ChunkIter).
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        session: Session,
        scratch: Box<[u8]>,
        error: Option<ChunkError>,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    /// Creates a new chunk stream from an async reader.
    pub fn new(reader: R, config: ChunkConfig) -> Self {
        Self {
            reader,
            session: Session::new(config),
            scratch: vec![0u8; READ_SIZE].into_boxed_slice(),
            error: None,
            finished: false,
        }
    }

    /// Returns the error that ended the stream, if any.
    pub fn error(&self) -> Option<&ChunkError> {
        self.error.as_ref()
    }

    /// Returns the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.session.offset()
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            match this.session.next_chunk() {
                Next::Chunk(chunk) => return Poll::Ready(Some(Ok(chunk))),
                Next::Done => {
                    *this.finished = true;
                    return Poll::Ready(None);
                }
                Next::NeedInput => {}
            }

            match this.reader.as_mut().poll_read(cx, this.scratch) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(n)) => this.session.feed(&this.scratch[..n]),
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => {}
                Poll::Ready(Err(e)) => {
                    let discarded = this.session.abort();
                    tracing::warn!(
                        offset = this.session.offset(),
                        discarded,
                        error = %e,
                        "read failed, chunking stopped"
                    );
                    let err = ChunkError::from(e);
                    *this.error = Some(err.clone());
                    *this.finished = true;
                    return Poll::Ready(Some(Err(err)));
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use gearchunk::{chunk_async, ChunkConfig};
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(file.compat(), ChunkConfig::reference());
/// ```
pub fn chunk_async<R: AsyncRead>(reader: R, config: ChunkConfig) -> ChunkStream<R> {
    ChunkStream::new(reader, config)
}
