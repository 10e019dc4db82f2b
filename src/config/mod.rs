//! Configuration for chunking behavior.
//!
//! [`ChunkConfig`] validates a `(min, avg, max)` size triple and resolves it
//! into the thresholds and bit masks the boundary detector uses.
//!
//! # Example
//!
//! ```
//! use gearchunk::ChunkConfig;
//!
//! // Custom chunk sizes
//! let config = ChunkConfig::new(4096, 16384, 65536)?;
//! assert_eq!(config.mask_small(), (1 << 16) - 1);
//! assert_eq!(config.mask_large(), (1 << 12) - 1);
//!
//! // Reference parameters
//! let reference = ChunkConfig::reference();
//! assert_eq!(reference.avg_size(), 8192);
//! # Ok::<(), gearchunk::ChunkError>(())
//! ```

use crate::error::ChunkError;

/// Reference minimum chunk size (2 KiB).
pub const REFERENCE_MIN_SIZE: usize = 2 * 1024;

/// Reference average chunk size (8 KiB).
pub const REFERENCE_AVG_SIZE: usize = 8 * 1024;

/// Reference maximum chunk size (64 KiB).
pub const REFERENCE_MAX_SIZE: usize = 64 * 1024;

/// Default normalization level (masks differ from `log2(avg_size)` by ±2 bits).
pub const DEFAULT_NORMALIZATION_LEVEL: u8 = 2;

/// Largest number of significant bits a mask may have.
const MAX_MASK_BITS: u32 = 63;

/// Resolved configuration for content-defined chunking.
///
/// Holds the validated size triple together with the derived detector
/// parameters:
///
/// - `mask_small` has `bits + level` low bits set and is used while the
///   current chunk is shorter than `normal_size`
/// - `mask_large` has `bits - level` low bits set and is used from
///   `normal_size` up to `max_size`
///
/// where `bits = round(log2(avg_size))`. The stricter mask suppresses
/// premature cuts, the looser one makes a cut increasingly likely past the
/// average, which narrows the chunk length distribution.
///
/// A `ChunkConfig` can only be obtained through validating constructors, so
/// any value in hand satisfies `0 < min_size < avg_size < max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    min_size: usize,
    avg_size: usize,
    max_size: usize,
    normal_size: usize,
    mask_small: u64,
    mask_large: u64,
    normalization_level: u8,
}

impl ChunkConfig {
    /// Creates a new configuration with the default normalization level.
    ///
    /// Returns [`ChunkError::InvalidConfig`] unless `1 <= min_size <
    /// avg_size < max_size` and `avg_size` yields masks of 1 to 63 bits.
    pub fn new(min_size: usize, avg_size: usize, max_size: usize) -> Result<Self, ChunkError> {
        Self::resolve(min_size, avg_size, max_size, DEFAULT_NORMALIZATION_LEVEL)
    }

    /// Returns the reference configuration (2 KiB / 8 KiB / 64 KiB).
    ///
    /// This is the preset the reference chunker's golden chunk lengths are
    /// published for.
    pub const fn reference() -> Self {
        Self::derive(
            REFERENCE_MIN_SIZE,
            REFERENCE_AVG_SIZE,
            REFERENCE_MAX_SIZE,
            mask_bits(REFERENCE_AVG_SIZE),
            DEFAULT_NORMALIZATION_LEVEL as u32,
        )
    }

    /// Re-derives the masks with a different normalization level.
    ///
    /// Level 0 uses a single mask on both sides of `normal_size`.
    pub fn with_normalization_level(self, level: u8) -> Result<Self, ChunkError> {
        Self::resolve(self.min_size, self.avg_size, self.max_size, level)
    }

    fn resolve(
        min_size: usize,
        avg_size: usize,
        max_size: usize,
        level: u8,
    ) -> Result<Self, ChunkError> {
        if min_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "min_size must be at least 1",
            });
        }

        if avg_size <= min_size {
            return Err(ChunkError::InvalidConfig {
                message: "avg_size must be greater than min_size",
            });
        }

        if max_size <= avg_size {
            return Err(ChunkError::InvalidConfig {
                message: "max_size must be greater than avg_size",
            });
        }

        let bits = mask_bits(avg_size);
        let level = u32::from(level);

        if bits <= level || bits + level > MAX_MASK_BITS {
            return Err(ChunkError::InvalidConfig {
                message: "avg_size does not yield a usable mask at this normalization level",
            });
        }

        let config = Self::derive(min_size, avg_size, max_size, bits, level);

        tracing::debug!(
            min_size,
            avg_size,
            max_size,
            bits,
            mask_small = config.mask_small,
            mask_large = config.mask_large,
            "resolved chunk config"
        );

        Ok(config)
    }

    /// Builds the resolved value. `bits` and `level` must already be checked.
    const fn derive(
        min_size: usize,
        avg_size: usize,
        max_size: usize,
        bits: u32,
        level: u32,
    ) -> Self {
        Self {
            min_size,
            avg_size,
            max_size,
            normal_size: avg_size,
            mask_small: low_bits(bits + level),
            mask_large: low_bits(bits - level),
            normalization_level: level as u8,
        }
    }

    /// Returns the minimum chunk size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Returns the average chunk size.
    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    /// Returns the maximum chunk size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the chunk length at which the detector switches masks.
    pub fn normal_size(&self) -> usize {
        self.normal_size
    }

    /// Returns the mask used below `normal_size`.
    pub fn mask_small(&self) -> u64 {
        self.mask_small
    }

    /// Returns the mask used from `normal_size` on.
    pub fn mask_large(&self) -> u64 {
        self.mask_large
    }

    /// Returns the normalization level.
    pub fn normalization_level(&self) -> u8 {
        self.normalization_level
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Signed entry point for callers whose sizes may be negative.
///
/// Any negative or out-of-range component is reported as the same parameter
/// error [`ChunkConfig::new`] returns.
impl TryFrom<(i64, i64, i64)> for ChunkConfig {
    type Error = ChunkError;

    fn try_from((min_size, avg_size, max_size): (i64, i64, i64)) -> Result<Self, Self::Error> {
        let size = |value: i64| {
            usize::try_from(value).map_err(|_| ChunkError::InvalidConfig {
                message: "chunk sizes must be positive",
            })
        };
        Self::new(size(min_size)?, size(avg_size)?, size(max_size)?)
    }
}

/// `round(log2(avg_size))`, computed exactly: round up when
/// `avg_size >= 2^(b + 1/2)`, i.e. `avg_size^2 >= 2^(2b + 1)`.
const fn mask_bits(avg_size: usize) -> u32 {
    let floor = avg_size.ilog2();
    let square = (avg_size as u128) * (avg_size as u128);
    if square >= 1u128 << (2 * floor + 1) {
        floor + 1
    } else {
        floor
    }
}

const fn low_bits(count: u32) -> u64 {
    (1u64 << count) - 1
}
