//! Error types for kcommon.

use thiserror::Error;

/// Errors that can occur while pooling objects or manipulating text.
///
/// All of these describe caller misuse (bad index, bad pattern, bad
/// configuration). None of them is retried internally.
#[derive(Debug, Error)]
pub enum KclError {
    /// An index was outside the buffer after negative-index normalization.
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// The index as supplied by the caller (before normalization).
        index: isize,
        /// The length of the buffer at the time of the call.
        length: usize,
    },

    /// A normalized range had its start behind its end.
    #[error("invalid range {start}..{end} for length {length}")]
    InvalidRange {
        /// Normalized start position.
        start: usize,
        /// Normalized end position.
        end: usize,
        /// The length of the buffer at the time of the call.
        length: usize,
    },

    /// A regular expression failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A key template lacked the `{}` placeholder.
    #[error("template '{template}' has no {{}} placeholder")]
    InvalidTemplate {
        /// The offending template.
        template: String,
    },

    /// A version string could not be parsed.
    #[error("cannot parse version '{input}': {reason}")]
    InvalidVersion {
        /// The offending input.
        input: String,
        /// What went wrong.
        reason: String,
    },
}

/// Result type alias for kcommon operations.
pub type Result<T> = std::result::Result<T, KclError>;
