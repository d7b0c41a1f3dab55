//! Object pooling.
//!
//! - [`Bucket`] - Generic reuse pool driven by factory/reset callbacks
//! - [`Pooled`] - Guard that returns its instance to the bucket on drop
//! - [`BufferPool`] - Size-aware pool of `BytesMut` (feature `bytes-pool`)
//! - [`buckets`] - Process-wide buckets for common transient types

mod bucket;
#[cfg(feature = "bytes-pool")]
mod buffer;
pub mod buckets;

pub use bucket::{Bucket, BucketStats, Pooled};
#[cfg(feature = "bytes-pool")]
pub use buffer::BufferPool;
