//! Configuration for pooling behavior.
//!
//! - [`BucketConfig`] - Bounds the free list of a [`Bucket`](crate::Bucket)
//! - [`BufferConfig`] - Capacity window and bound for a size-aware buffer pool
//!
//! # Example
//!
//! ```
//! use kcommon::{BucketConfig, BufferConfig};
//!
//! let config = BucketConfig::new(16)?;
//!
//! let buffers = BufferConfig::default()
//!     .with_max_retained_capacity(256 * 1024);
//! buffers.validate()?;
//!
//! # Ok::<(), kcommon::KclError>(())
//! ```

use crate::error::KclError;

/// Default number of freed instances a bucket keeps around.
pub const DEFAULT_MAX_POOLED: usize = 64;

/// Default capacity for freshly allocated pooled buffers (8 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Buffers smaller than this are not worth keeping (1 KiB).
pub const DEFAULT_MIN_RETAINED_CAPACITY: usize = 1024;

/// Buffers larger than this are dropped on free (64 KiB).
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Configuration for a [`Bucket`](crate::Bucket).
///
/// Freed instances beyond `max_pooled` are dropped rather than retained,
/// so an idle bucket never holds more than that many objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketConfig {
    max_pooled: usize,
}

impl BucketConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if `max_pooled` is zero.
    ///
    /// ```
    /// use kcommon::BucketConfig;
    ///
    /// let config = BucketConfig::new(8)?;
    /// assert_eq!(config.max_pooled(), 8);
    /// assert!(BucketConfig::new(0).is_err());
    /// # Ok::<(), kcommon::KclError>(())
    /// ```
    pub fn new(max_pooled: usize) -> Result<Self, KclError> {
        if max_pooled == 0 {
            return Err(KclError::InvalidConfig {
                message: "max_pooled must be non-zero",
            });
        }
        Ok(Self { max_pooled })
    }

    /// Sets the free list bound (unvalidated).
    pub fn with_max_pooled(mut self, max_pooled: usize) -> Self {
        self.max_pooled = max_pooled;
        self
    }

    /// Returns the free list bound.
    pub fn max_pooled(&self) -> usize {
        self.max_pooled
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), KclError> {
        Self::new(self.max_pooled).map(|_| ())
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            max_pooled: DEFAULT_MAX_POOLED,
        }
    }
}

/// Configuration for a size-aware buffer pool.
///
/// Only buffers whose capacity lies in
/// `min_retained_capacity..=max_retained_capacity` are kept on free.
/// `default_capacity` is used when the caller has no size requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    default_capacity: usize,
    min_retained_capacity: usize,
    max_retained_capacity: usize,
    max_pooled: usize,
}

impl BufferConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if any value is zero or the retention window is
    /// inverted.
    pub fn new(
        default_capacity: usize,
        min_retained_capacity: usize,
        max_retained_capacity: usize,
        max_pooled: usize,
    ) -> Result<Self, KclError> {
        if default_capacity == 0 || max_retained_capacity == 0 || max_pooled == 0 {
            return Err(KclError::InvalidConfig {
                message: "buffer capacities and max_pooled must be non-zero",
            });
        }

        if min_retained_capacity > max_retained_capacity {
            return Err(KclError::InvalidConfig {
                message: "min_retained_capacity cannot be greater than max_retained_capacity",
            });
        }

        Ok(Self {
            default_capacity,
            min_retained_capacity,
            max_retained_capacity,
            max_pooled,
        })
    }

    /// Sets the capacity used for allocations without a size hint.
    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Sets the smallest capacity that is retained on free.
    pub fn with_min_retained_capacity(mut self, capacity: usize) -> Self {
        self.min_retained_capacity = capacity;
        self
    }

    /// Sets the largest capacity that is retained on free.
    pub fn with_max_retained_capacity(mut self, capacity: usize) -> Self {
        self.max_retained_capacity = capacity;
        self
    }

    /// Sets the free list bound.
    pub fn with_max_pooled(mut self, max_pooled: usize) -> Self {
        self.max_pooled = max_pooled;
        self
    }

    /// Returns the capacity used for allocations without a size hint.
    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    /// Returns the smallest retained capacity.
    pub fn min_retained_capacity(&self) -> usize {
        self.min_retained_capacity
    }

    /// Returns the largest retained capacity.
    pub fn max_retained_capacity(&self) -> usize {
        self.max_retained_capacity
    }

    /// Returns the free list bound.
    pub fn max_pooled(&self) -> usize {
        self.max_pooled
    }

    /// Returns true if a buffer of `capacity` would be kept on free.
    pub fn retains(&self, capacity: usize) -> bool {
        capacity >= self.min_retained_capacity && capacity <= self.max_retained_capacity
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use kcommon::BufferConfig;
    ///
    /// let config = BufferConfig::default().with_min_retained_capacity(1 << 20);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), KclError> {
        Self::new(
            self.default_capacity,
            self.min_retained_capacity,
            self.max_retained_capacity,
            self.max_pooled,
        )
        .map(|_| ())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_BUFFER_CAPACITY,
            min_retained_capacity: DEFAULT_MIN_RETAINED_CAPACITY,
            max_retained_capacity: DEFAULT_MAX_RETAINED_CAPACITY,
            max_pooled: DEFAULT_MAX_POOLED,
        }
    }
}
