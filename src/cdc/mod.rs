//! Content-Defined Chunking (CDC) primitives.
//!
//! - [`GEAR_TABLE`] / [`gear`] - per-byte constants for the gear hash
//! - [`RollingState`] - FastCDC boundary detector

mod fastcdc;
mod gear;

pub use fastcdc::RollingState;
pub use gear::{GEAR_TABLE, gear};
