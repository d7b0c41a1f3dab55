//! Small value types.
//!
//! - [`Version`] - `major.minor[.micro][.qualifier]` version numbers

mod version;

pub use version::Version;
