//! Size-aware pool of reusable byte buffers.

use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::BytesMut;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::BucketStats;
use crate::config::BufferConfig;

/// A pool of `BytesMut` buffers that honors a minimum capacity on
/// allocation.
///
/// Buffers outside the configured retention window are dropped on free
/// instead of being kept, so a single oversized request cannot pin memory.
///
/// ```
/// use kcommon::{BufferConfig, BufferPool};
///
/// let pool = BufferPool::new(BufferConfig::default());
/// let mut buf = pool.allocate(4096);
/// buf.extend_from_slice(b"hello");
/// pool.free(buf);
///
/// let buf = pool.allocate(1024);
/// assert!(buf.is_empty());
/// assert!(buf.capacity() >= 4096);
/// ```
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<BytesMut>>,
    config: BufferConfig,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    drops: AtomicUsize,
}

impl BufferPool {
    /// Creates an empty pool.
    pub fn new(config: BufferConfig) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            config,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            drops: AtomicUsize::new(0),
        }
    }

    /// Takes a buffer with the configured default capacity.
    pub fn allocate_default(&self) -> BytesMut {
        self.allocate(self.config.default_capacity())
    }

    /// Takes a buffer with at least `min_capacity` bytes of capacity.
    ///
    /// The first pooled buffer that is large enough wins; otherwise a new
    /// one is allocated. The returned buffer may be larger than requested.
    pub fn allocate(&self, min_capacity: usize) -> BytesMut {
        let found = {
            let mut free = self.free.lock();
            free.iter()
                .position(|buf| buf.capacity() >= min_capacity)
                .map(|idx| free.swap_remove(idx))
        };

        match found {
            Some(buf) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(min_capacity, "buffer pool miss");
                BytesMut::with_capacity(min_capacity.max(self.config.default_capacity()))
            }
        }
    }

    /// Clears `buf` and keeps it for reuse if its capacity is retained.
    pub fn free(&self, buf: impl Into<Option<BytesMut>>) {
        let Some(mut buf) = buf.into() else {
            return;
        };
        if !self.config.retains(buf.capacity()) {
            self.drops.fetch_add(1, Ordering::Relaxed);
            trace!(capacity = buf.capacity(), "buffer outside retention window");
            return;
        }

        let mut free = self.free.lock();
        if free.len() >= self.config.max_pooled() {
            drop(free);
            self.drops.fetch_add(1, Ordering::Relaxed);
            return;
        }
        buf.clear();
        free.push(buf);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops pooled buffers until at most `retain` remain.
    ///
    /// Returns the number of buffers dropped.
    pub fn compact(&self, retain: usize) -> usize {
        let mut free = self.free.lock();
        let dropped = free.len().saturating_sub(retain);
        free.truncate(retain);
        debug!(dropped, retain, "buffer pool compacted");
        dropped
    }

    /// Drops every pooled buffer.
    pub fn reset(&self) {
        self.compact(0);
    }

    /// Number of pooled buffers. Advisory only.
    pub fn len(&self) -> usize {
        self.free.lock().len()
    }

    /// Returns true if nothing is pooled. Advisory only.
    pub fn is_empty(&self) -> bool {
        self.free.lock().is_empty()
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> BucketStats {
        BucketStats {
            pooled: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BUFFER_CAPACITY;

    #[test]
    fn test_buffer_allocate() {
        let pool = BufferPool::default();
        let buf = pool.allocate_default();
        assert!(buf.capacity() >= DEFAULT_BUFFER_CAPACITY);
        assert_eq!(pool.stats().misses, 1);
    }

    #[test]
    fn test_buffer_reuse() {
        let pool = BufferPool::default();
        {
            let mut buf = pool.allocate_default();
            buf.extend_from_slice(b"test data");
            pool.free(buf);
        }

        let buf2 = pool.allocate_default();
        assert!(buf2.is_empty());
        assert!(buf2.capacity() >= DEFAULT_BUFFER_CAPACITY);
        assert_eq!(pool.stats().hits, 1);
    }

    #[test]
    fn test_allocate_skips_small_buffers() {
        let config = BufferConfig::new(1024, 1024, 1 << 20, 8).unwrap();
        let pool = BufferPool::new(config);
        pool.free(BytesMut::with_capacity(1024));
        pool.free(BytesMut::with_capacity(32 * 1024));

        let buf = pool.allocate(16 * 1024);
        assert!(buf.capacity() >= 32 * 1024);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_free_drops_outside_window() {
        let pool = BufferPool::default();
        pool.free(BytesMut::with_capacity(16));
        pool.free(BytesMut::with_capacity(1 << 20));
        pool.free(None);
        assert!(pool.is_empty());
        assert_eq!(pool.stats().drops, 2);
    }

    #[test]
    fn test_compact_and_reset() {
        let pool = BufferPool::default();
        for _ in 0..4 {
            pool.free(BytesMut::with_capacity(4096));
        }
        assert_eq!(pool.compact(1), 3);
        assert_eq!(pool.len(), 1);
        pool.reset();
        assert!(pool.is_empty());
    }
}
