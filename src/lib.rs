//! kcommon
//!
//! Reusable object buckets and a negative-index aware text buffer.
//!
//! `kcommon` provides two small building blocks that work together:
//!
//! - **buckets**: reuse pools for transient objects (builders, vectors,
//!   maps, byte buffers) with a bounded free list
//! - **text buffers**: a `StringBuilder`-like buffer with negative
//!   indices, regex replacement and delimited region substitution
//!
//! The crate intentionally:
//! - does NOT track borrowed instances (a bucket only knows what was freed)
//! - does NOT retry failing factories
//! - does NOT install a logging subscriber
//!
//! # Pooling
//!
//! ```
//! use kcommon::{Bucket, BucketConfig};
//!
//! fn main() -> Result<(), kcommon::KclError> {
//!     let bucket = Bucket::with_config(Vec::<u8>::new, Vec::clear, BucketConfig::new(8)?);
//!
//!     let mut scratch = bucket.take();
//!     scratch.extend_from_slice(b"temporary");
//!     drop(scratch); // cleared and returned
//!
//!     assert_eq!(bucket.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! # Text
//!
//! ```
//! use kcommon::{StringFBuilder, StringLike};
//!
//! fn main() -> Result<(), kcommon::KclError> {
//!     let mut sb = StringFBuilder::from("Dear ${name}, [[drop me]]welcome!");
//!     sb.replace_regions("${", Some("}"), "Ada")
//!         .replace_regions_with("[[", Some("]]"), |_| None)
//!         .replace_all(r"\s+", " ")?;
//!
//!     assert_eq!(sb, "Dear Ada, welcome!");
//!     assert_eq!(sb.char_at(-1)?, '!');
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;

pub mod pool;
pub mod text;
pub mod types;

//
// Public surface
//

pub use config::{BucketConfig, BufferConfig};
pub use error::{KclError, Result};
pub use pool::{Bucket, BucketStats, Pooled, buckets};
pub use text::{StringFBuffer, StringFBuilder, StringLike, TrimSide};
pub use types::Version;

#[cfg(feature = "bytes-pool")]
pub use pool::BufferPool;
