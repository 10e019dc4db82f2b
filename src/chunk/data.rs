//! The Chunk type - represents a content-defined chunk.

use bytes::Bytes;
use std::fmt;
use std::ops::Range;

/// A content-defined chunk and its position in the source stream.
///
/// `data` is an owned [`Bytes`] handle: it stays valid after the chunker
/// moves on, and cloning it does not copy the payload.
///
/// # Example
///
/// ```
/// use gearchunk::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk::new(Bytes::from_static(b"hello world"), 100);
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 100..111);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// The offset of the first byte in the source stream.
    pub offset: u64,
}

impl Chunk {
    /// Creates a chunk starting at `offset`.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the byte range this chunk covers in the source stream.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {})", self.len(), self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let chunk = Chunk::new(&b"hello"[..], 0);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.as_ref(), b"hello");
    }

    #[test]
    fn test_empty() {
        let chunk = Chunk::new(Bytes::new(), 7);
        assert!(chunk.is_empty());
        assert_eq!(chunk.range(), 7..7);
    }

    #[test]
    fn test_end_and_range() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        assert_eq!(chunk.end(), 105);
        assert_eq!(chunk.range(), 100..105);
    }

    #[test]
    fn test_display() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        assert_eq!(chunk.to_string(), "Chunk(5 bytes @ 100)");
    }

    #[test]
    fn test_into_data() {
        let chunk = Chunk::new(vec![1u8, 2, 3], 0);
        assert_eq!(chunk.into_data(), Bytes::from_static(&[1, 2, 3]));
    }
}
