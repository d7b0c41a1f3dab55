//! Process-wide buckets for frequently used transient types.
//!
//! Each bucket is created lazily on first use and lives for the rest of
//! the process. Generic buckets are keyed by the concrete type.
//!
//! ```
//! use kcommon::buckets;
//! use kcommon::StringLike;
//!
//! let text = buckets::string_fbuilder().for_instance(|sb| {
//!     sb.append("hello_world").camel_case();
//!     sb.to_text()
//! });
//! assert_eq!(text, "helloWorld");
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::OnceLock;

use parking_lot::Mutex;

use super::Bucket;
use crate::text::{StringFBuffer, StringFBuilder, StringLike};

#[cfg(feature = "bytes-pool")]
use super::BufferPool;

type Registry = Mutex<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

static STRING_FBUILDER: OnceLock<Bucket<StringFBuilder>> = OnceLock::new();
static STRING_FBUFFER: OnceLock<Bucket<StringFBuffer>> = OnceLock::new();
static STRING: OnceLock<Bucket<String>> = OnceLock::new();

#[cfg(feature = "bytes-pool")]
static BYTES: OnceLock<BufferPool> = OnceLock::new();

/// Returns the shared bucket registered for `T`, creating it with `init`
/// on first use.
fn registered<T, F>(init: F) -> &'static Bucket<T>
where
    T: Send + 'static,
    F: FnOnce() -> Bucket<T>,
{
    let registry = REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
    let entry: &'static (dyn Any + Send + Sync) = *registry
        .lock()
        .entry(TypeId::of::<Bucket<T>>())
        .or_insert_with(|| {
            let leaked: &'static Bucket<T> = Box::leak(Box::new(init()));
            leaked as &'static (dyn Any + Send + Sync)
        });
    match entry.downcast_ref::<Bucket<T>>() {
        Some(bucket) => bucket,
        None => unreachable!("registry entry keyed by a different type"),
    }
}

/// Shared bucket of [`StringFBuilder`]s, truncated on free.
pub fn string_fbuilder() -> &'static Bucket<StringFBuilder> {
    STRING_FBUILDER.get_or_init(|| {
        Bucket::new(StringFBuilder::new, |sb: &mut StringFBuilder| {
            sb.clear();
        })
    })
}

/// Shared bucket of [`StringFBuffer`]s, truncated on free.
pub fn string_fbuffer() -> &'static Bucket<StringFBuffer> {
    STRING_FBUFFER.get_or_init(|| {
        Bucket::new(StringFBuffer::new, |sb: &mut StringFBuffer| {
            sb.clear();
        })
    })
}

/// Shared bucket of plain `String`s.
pub fn string() -> &'static Bucket<String> {
    STRING.get_or_init(|| Bucket::new(String::new, String::clear))
}

/// Shared bucket of `Vec<T>`, cleared on free.
pub fn vec<T: Send + 'static>() -> &'static Bucket<Vec<T>> {
    registered(|| Bucket::new(Vec::new, Vec::clear))
}

/// Shared bucket of `HashMap<K, V>`, cleared on free.
pub fn hash_map<K, V>() -> &'static Bucket<HashMap<K, V>>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    registered(|| Bucket::new(HashMap::new, HashMap::clear))
}

/// Shared size-aware pool of byte buffers.
#[cfg(feature = "bytes-pool")]
pub fn bytes() -> &'static BufferPool {
    BYTES.get_or_init(BufferPool::default)
}
