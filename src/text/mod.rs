//! Text buffers.
//!
//! - [`StringLike`] - Mutable character buffer with negative indices
//! - [`StringFBuilder`] - Owned, unsynchronized implementation
//! - [`StringFBuffer`] - Shared, lock-protected implementation
//! - [`functions`] - `&str` helpers built on pooled builders

mod buffer;
mod builder;
mod index;
mod like;

pub mod functions;

pub use buffer::StringFBuffer;
pub use builder::StringFBuilder;
pub use index::adjust_index;
pub use like::{StringLike, TrimSide};
