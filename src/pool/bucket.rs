//! Generic object bucket with factory/reset callbacks.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::BucketConfig;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;
type Resetter<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// A reuse pool for transient objects like builders and collections.
///
/// Freed instances are reset and kept in a bounded free list; `allocate`
/// hands them out again before falling back to the factory. The bucket is
/// an optimization only: callers must never rely on getting a particular
/// instance back.
///
/// # Example
///
/// ```
/// use kcommon::Bucket;
///
/// let bucket = Bucket::new(Vec::<u32>::new, Vec::clear);
///
/// let mut list = bucket.allocate();
/// list.push(42);
/// bucket.free(list);
///
/// let list = bucket.allocate();
/// assert!(list.is_empty());
/// ```
pub struct Bucket<T> {
    free: Mutex<Vec<T>>,
    factory: Factory<T>,
    resetter: Resetter<T>,
    config: BucketConfig,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    drops: AtomicUsize,
}

/// Snapshot of bucket counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketStats {
    /// Instances currently held in the free list.
    pub pooled: usize,
    /// Allocations served from the free list.
    pub hits: usize,
    /// Allocations served by the factory.
    pub misses: usize,
    /// Instances accepted back into the free list.
    pub returns: usize,
    /// Instances dropped because the free list was full.
    pub drops: usize,
}

impl<T> Bucket<T> {
    /// Creates a bucket with the default [`BucketConfig`].
    pub fn new<F, R>(factory: F, resetter: R) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        R: Fn(&mut T) + Send + Sync + 'static,
    {
        Self::with_config(factory, resetter, BucketConfig::default())
    }

    /// Creates a bucket with an explicit configuration.
    pub fn with_config<F, R>(factory: F, resetter: R, config: BucketConfig) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        R: Fn(&mut T) + Send + Sync + 'static,
    {
        Self {
            free: Mutex::new(Vec::new()),
            factory: Box::new(factory),
            resetter: Box::new(resetter),
            config,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            drops: AtomicUsize::new(0),
        }
    }

    /// Returns a previously freed instance, or a new one from the factory.
    ///
    /// A panicking factory propagates to the caller.
    pub fn allocate(&self) -> T {
        if let Some(instance) = self.pop() {
            return instance;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("bucket miss, creating new instance");
        (self.factory)()
    }

    /// Like [`allocate`](Self::allocate) but a miss is served by `create`.
    ///
    /// The error of `create` is returned unchanged.
    pub fn allocate_with<E, F>(&self, create: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(instance) = self.pop() {
            return Ok(instance);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        create()
    }

    fn pop(&self) -> Option<T> {
        let instance = self.free.lock().pop();
        if instance.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        instance
    }

    /// Resets `instance` and makes it available for reuse.
    ///
    /// `None` is accepted and ignored. The reset runs inside the same
    /// critical section as the insertion, so no other caller can observe
    /// the instance before it is clean.
    pub fn free(&self, instance: impl Into<Option<T>>) {
        let Some(mut instance) = instance.into() else {
            return;
        };
        let mut free = self.free.lock();
        if free.len() >= self.config.max_pooled() {
            drop(free);
            self.drops.fetch_add(1, Ordering::Relaxed);
            trace!(max = self.config.max_pooled(), "bucket full, dropping instance");
            return;
        }
        (self.resetter)(&mut instance);
        free.push(instance);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops every pooled instance. Checked-out instances are not affected.
    pub fn reset(&self) {
        let dropped = std::mem::take(&mut *self.free.lock());
        debug!(count = dropped.len(), "bucket reset");
    }

    /// Number of pooled instances. Advisory only.
    pub fn len(&self) -> usize {
        self.free.lock().len()
    }

    /// Returns true if nothing is pooled. Advisory only.
    pub fn is_empty(&self) -> bool {
        self.free.lock().is_empty()
    }

    /// Returns the configuration of this bucket.
    pub fn config(&self) -> &BucketConfig {
        &self.config
    }

    /// Returns a snapshot of the bucket counters.
    pub fn stats(&self) -> BucketStats {
        BucketStats {
            pooled: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }

    /// Allocates an instance wrapped in a guard that frees it on drop.
    pub fn take(&self) -> Pooled<'_, T> {
        Pooled {
            bucket: self,
            instance: Some(self.allocate()),
        }
    }

    /// Runs `f` with a pooled instance and frees it afterwards, also when
    /// `f` panics.
    ///
    /// ```
    /// use kcommon::Bucket;
    ///
    /// let bucket = Bucket::new(String::new, String::clear);
    /// let len = bucket.for_instance(|s| {
    ///     s.push_str("hello");
    ///     s.len()
    /// });
    /// assert_eq!(len, 5);
    /// ```
    pub fn for_instance<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.take();
        f(&mut guard)
    }

    /// Like [`for_instance`](Self::for_instance) with an extra parameter.
    pub fn for_instance_with<P, R, F>(&self, f: F, param: P) -> R
    where
        F: FnOnce(&mut T, P) -> R,
    {
        let mut guard = self.take();
        f(&mut guard, param)
    }
}

impl<T: Default + 'static> Default for Bucket<T> {
    /// A bucket that creates and resets via `Default`.
    fn default() -> Self {
        Self::new(T::default, |instance: &mut T| *instance = T::default())
    }
}

impl<T> fmt::Debug for Bucket<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// An instance borrowed from a [`Bucket`], returned on drop.
pub struct Pooled<'a, T> {
    bucket: &'a Bucket<T>,
    instance: Option<T>,
}

impl<T> Pooled<'_, T> {
    /// Detaches the instance; it will not be returned to the bucket.
    pub fn into_inner(mut self) -> T {
        // Always Some until drop or into_inner.
        match self.instance.take() {
            Some(instance) => instance,
            None => unreachable!("pooled instance already taken"),
        }
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.instance {
            Some(instance) => instance,
            None => unreachable!("pooled instance already taken"),
        }
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.instance {
            Some(instance) => instance,
            None => unreachable!("pooled instance already taken"),
        }
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.bucket.free(self.instance.take());
    }
}

impl<T: fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.instance).finish()
    }
}
