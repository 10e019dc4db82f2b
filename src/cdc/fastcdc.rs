//! FastCDC rolling boundary detector.
//!
//! The detector feeds bytes one at a time through a gear hash and decides
//! whether the current position ends a chunk.
//!
//! # Algorithm Overview
//!
//! For every byte:
//!
//! 1. `hash = (hash << 1) + GEAR[byte]` (wrapping)
//! 2. below `min_size` bytes, never cut
//! 3. below `normal_size`, cut iff `hash & mask_small == 0`
//! 4. below `max_size`, cut iff `hash & mask_large == 0`
//! 5. at `max_size`, always cut
//!
//! The cut byte belongs to the chunk it ends.
//!
//! # References
//!
//! Based on "FastCDC: A Fast and Efficient Content-Defined Chunking Approach for Data Deduplication"
//! by Wen Xia et al., USENIX ATC 2016.

use super::gear::gear;
use crate::config::ChunkConfig;

/// Rolling hash state for the chunk currently being scanned.
///
/// The state is a plain value: it starts at zero for every chunk and goes
/// back to zero whenever [`step`](Self::step) reports a boundary, so no
/// history leaks from one chunk into the next.
///
/// # Example
///
/// ```
/// use gearchunk::{ChunkConfig, RollingState};
///
/// let config = ChunkConfig::new(4, 16, 64)?;
/// let mut state = RollingState::new();
///
/// let data = [0x55u8; 100];
/// let len = state.find_boundary(&data, &config).unwrap();
/// assert!((4..=64).contains(&len));
/// # Ok::<(), gearchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollingState {
    hash: u64,
    bytes_since_boundary: usize,
}

impl RollingState {
    /// Creates a zeroed state.
    pub const fn new() -> Self {
        Self {
            hash: 0,
            bytes_since_boundary: 0,
        }
    }

    /// Feeds one byte and returns true if it ends a chunk.
    ///
    /// On a boundary the state resets so the next byte starts a new chunk.
    #[inline]
    pub fn step(&mut self, byte: u8, config: &ChunkConfig) -> bool {
        self.hash = (self.hash << 1).wrapping_add(gear(byte));
        self.bytes_since_boundary += 1;

        let len = self.bytes_since_boundary;
        let boundary = if len < config.min_size() {
            false
        } else if len < config.normal_size() {
            self.hash & config.mask_small() == 0
        } else if len < config.max_size() {
            self.hash & config.mask_large() == 0
        } else {
            true
        };

        if boundary {
            self.reset();
        }
        boundary
    }

    /// Feeds `data` until a boundary is found.
    ///
    /// Returns the number of bytes of `data` that belong to the finished
    /// chunk, or `None` if `data` ran out first. In the latter case the
    /// state keeps the partial chunk so scanning can resume with more input.
    pub fn find_boundary(&mut self, data: &[u8], config: &ChunkConfig) -> Option<usize> {
        data.iter()
            .position(|&byte| self.step(byte, config))
            .map(|i| i + 1)
    }

    /// Clears the hash and byte counter.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of bytes fed since the last boundary.
    pub fn bytes_since_boundary(&self) -> usize {
        self.bytes_since_boundary
    }

    /// Returns the current hash value.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}
