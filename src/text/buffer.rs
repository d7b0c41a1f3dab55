//! Synchronized, shareable text buffer.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use regex::Regex;
use tracing::trace;

use super::{StringFBuilder, StringLike, TrimSide};
use crate::error::Result;

/// A thread-safe [`StringLike`] handle.
///
/// Clones share the same content. Every operation runs under one lock
/// acquisition, so indices are validated against the content they are
/// applied to. Compound edits that must not interleave with other handles
/// go through [`locked`](Self::locked).
///
/// ```
/// use std::thread;
/// use kcommon::{StringFBuffer, StringLike};
///
/// let buffer = StringFBuffer::new();
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let buffer = buffer.clone();
///         thread::spawn(move || {
///             buffer.locked(|sb| {
///                 sb.append("ab");
///             })
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(buffer.len(), 8);
/// ```
#[derive(Clone, Default)]
pub struct StringFBuffer {
    inner: Arc<Mutex<StringFBuilder>>,
}

impl StringFBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(StringFBuilder::with_capacity(capacity))
    }

    /// Runs `f` while holding the lock.
    ///
    /// `f` must not touch this buffer through another handle.
    pub fn locked<R>(&self, f: impl FnOnce(&mut StringFBuilder) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Locks the buffer for direct access.
    pub fn lock(&self) -> MutexGuard<'_, StringFBuilder> {
        self.inner.lock()
    }

    /// Returns true if both handles share the same content.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Forwards provided methods to the inner builder under a single lock.
macro_rules! locked_chain {
    ($(fn $name:ident(&mut self $(, $arg:ident: $ty:ty)*);)*) => {
        $(
            fn $name(&mut self $(, $arg: $ty)*) -> &mut Self {
                self.inner.lock().$name($($arg),*);
                self
            }
        )*
    };
}

macro_rules! locked_try {
    ($(fn $name:ident(&mut self $(, $arg:ident: $ty:ty)*);)*) => {
        $(
            fn $name(&mut self $(, $arg: $ty)*) -> Result<&mut Self> {
                self.inner.lock().$name($($arg),*)?;
                Ok(self)
            }
        )*
    };
}

macro_rules! locked_query {
    ($(fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)*) => {
        $(
            fn $name(&self $(, $arg: $ty)*) -> $ret {
                self.inner.lock().$name($($arg),*)
            }
        )*
    };
}

impl StringFBuffer {
    /// Runs `edit` on a private copy of the content and installs the result
    /// if no other handle changed the buffer meanwhile; otherwise starts
    /// over from the new content.
    fn edit_unlocked(&mut self, mut edit: impl FnMut(&mut StringFBuilder)) -> &mut Self {
        loop {
            let snapshot = self.inner.lock().clone();
            let mut copy = snapshot.clone();
            edit(&mut copy);

            let mut inner = self.inner.lock();
            if *inner == snapshot {
                *inner = copy;
                break;
            }
            trace!("buffer changed during edit, retrying");
        }
        self
    }
}

impl StringLike for StringFBuffer {
    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(self.inner.lock().as_str())
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        self.inner.lock().splice(start, end, replacement);
    }

    fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    fn reserve(&mut self, additional: usize) -> &mut Self {
        self.inner.lock().reserve(additional);
        self
    }

    fn shrink_to_fit(&mut self) -> &mut Self {
        self.inner.lock().shrink_to_fit();
        self
    }

    locked_chain! {
        fn clear(&mut self);
        fn set_length(&mut self, new_length: usize);
        fn append(&mut self, text: &str);
        fn append_char(&mut self, ch: char);
        fn append_display(&mut self, value: impl fmt::Display);
        fn append_fmt(&mut self, args: fmt::Arguments<'_>);
        fn append_filling(&mut self, count: usize, ch: char);
        fn reverse(&mut self);
        fn trim_leading(&mut self);
        fn trim_trailing(&mut self);
        fn trim(&mut self);
        fn trim_chars(&mut self, chars: &str, side: TrimSide);
        fn remove_chars(&mut self, chars: &str);
        fn remove_start(&mut self, prefix: &str);
        fn remove_end(&mut self, suffix: &str);
        fn append_if_missing(&mut self, suffix: &str);
        fn prepend_if_missing(&mut self, prefix: &str);
        fn replace_char(&mut self, from: char, to: char);
        fn replace_literally_all(&mut self, search: &str, replacement: &str);
        fn replace_all_regex(&mut self, regex: &Regex, replacement: &str);
        fn replace_first_regex(&mut self, regex: &Regex, replacement: &str);
        fn replace_last_regex(&mut self, regex: &Regex, replacement: &str);
        fn replace_regions(&mut self, open: &str, close: Option<&str>, replacement: &str);
        fn first_up(&mut self);
        fn first_down(&mut self);
        fn camel_case(&mut self);
        fn to_lower_case(&mut self);
        fn to_upper_case(&mut self);
    }

    locked_try! {
        fn set_char_at(&mut self, index: isize, ch: char);
        fn insert(&mut self, index: isize, text: &str);
        fn insert_char(&mut self, index: isize, ch: char);
        fn insert_fmt(&mut self, index: isize, args: fmt::Arguments<'_>);
        fn delete(&mut self, start: isize, end: isize);
        fn delete_char_at(&mut self, index: isize);
        fn replace_range(&mut self, start: isize, end: isize, text: &str);
        fn replace_all(&mut self, pattern: &str, replacement: &str);
        fn replace_first(&mut self, pattern: &str, replacement: &str);
        fn replace_last(&mut self, pattern: &str, replacement: &str);
    }

    locked_query! {
        fn is_empty(&self) -> bool;
        fn to_text(&self) -> String;
        fn char_at(&self, index: isize) -> Result<char>;
        fn substring(&self, start: isize) -> Result<String>;
        fn substring_range(&self, start: isize, end: isize) -> Result<String>;
        fn index_of(&self, needle: &str) -> Option<usize>;
        fn index_of_from(&self, needle: &str, from: isize) -> Option<usize>;
        fn index_of_any_char(&self, chars: &[char], from: isize) -> Option<usize>;
        fn index_of_any(&self, needles: &[&str], from: isize) -> Option<usize>;
        fn last_index_of(&self, needle: &str) -> Option<usize>;
        fn last_index_of_from(&self, needle: &str, from: isize) -> Option<usize>;
        fn last_index_of_any_char(&self, chars: &[char]) -> Option<usize>;
        fn last_index_of_any(&self, needles: &[&str]) -> Option<usize>;
        fn starts_with(&self, prefix: &str) -> bool;
        fn starts_with_ignore_case(&self, prefix: &str) -> bool;
        fn ends_with(&self, suffix: &str) -> bool;
        fn ends_with_ignore_case(&self, suffix: &str) -> bool;
        fn equals(&self, other: &str) -> bool;
        fn equals_ignore_case(&self, other: &str) -> bool;
        fn split(&self, delimiters: &str) -> Vec<String>;
        fn split_regex(&self, pattern: &str) -> Result<Vec<String>>;
        fn split_with(&self, regex: &Regex) -> Vec<String>;
    }

    fn starts_with_many<'a>(&self, case_sensitive: bool, candidates: &[&'a str]) -> Option<&'a str> {
        self.inner.lock().starts_with_many(case_sensitive, candidates)
    }

    fn ends_with_many<'a>(&self, case_sensitive: bool, candidates: &[&'a str]) -> Option<&'a str> {
        self.inner.lock().ends_with_many(case_sensitive, candidates)
    }

    fn replace_all_map<K, V>(
        &mut self,
        replacements: &HashMap<K, V>,
        template: Option<&str>,
    ) -> Result<&mut Self>
    where
        K: AsRef<str> + Eq + Hash,
        V: AsRef<str>,
    {
        self.inner.lock().replace_all_map(replacements, template)?;
        Ok(self)
    }

    /// `replacer` runs without the lock held, so it may read this buffer
    /// through another handle. If the content changes before the result is
    /// installed the replacement is redone, calling `replacer` again.
    fn replace_all_with<F>(&mut self, regex: &Regex, mut replacer: F) -> &mut Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.edit_unlocked(|sb| {
            sb.replace_all_with(regex, &mut replacer);
        })
    }

    /// Same locking as [`replace_all_with`](Self::replace_all_with).
    fn replace_regions_with<F>(&mut self, open: &str, close: Option<&str>, mut replacer: F) -> &mut Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.edit_unlocked(|sb| {
            sb.replace_regions_with(open, close, &mut replacer);
        })
    }
}

impl From<StringFBuilder> for StringFBuffer {
    fn from(builder: StringFBuilder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(builder)),
        }
    }
}

impl From<&str> for StringFBuffer {
    fn from(text: &str) -> Self {
        Self::from(StringFBuilder::from(text))
    }
}

impl From<String> for StringFBuffer {
    fn from(text: String) -> Self {
        Self::from(StringFBuilder::from(text))
    }
}

impl fmt::Display for StringFBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.inner.lock().as_str())
    }
}

impl fmt::Debug for StringFBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StringFBuffer")
            .field(&self.inner.lock().as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_content() {
        let mut a = StringFBuffer::from("abc");
        let b = a.clone();
        a.append("def");
        assert_eq!(b.to_text(), "abcdef");
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_trait_operations() {
        let mut buffer = StringFBuffer::from("hello_world");
        buffer.camel_case().append("!");
        assert_eq!(buffer.to_string(), "helloWorld!");
        assert_eq!(buffer.char_at(-1).unwrap(), '!');
        assert_eq!(buffer.index_of("World"), Some(5));
    }

    #[test]
    fn test_locked_compound_edit() {
        let buffer = StringFBuffer::from("a,b");
        let pieces = buffer.locked(|sb| {
            sb.replace_char(',', ';');
            sb.split(";")
        });
        assert_eq!(pieces, vec!["a", "b"]);
        assert_eq!(buffer.lock().as_str(), "a;b");
    }

    #[test]
    fn test_replacer_may_read_through_other_handle() {
        let mut buffer = StringFBuffer::from("a-b");
        let reader = buffer.clone();
        let regex = Regex::new("-").unwrap();
        buffer.replace_all_with(&regex, |_| Some(reader.len().to_string()));
        assert_eq!(buffer.to_text(), "a3b");

        let mut buffer = StringFBuffer::from("x[y]z");
        let reader = buffer.clone();
        buffer.replace_regions_with("[", Some("]"), |inner| {
            Some(format!("{}{}", inner, reader.index_of("z").unwrap_or(0)))
        });
        assert_eq!(buffer.to_text(), "xy4z");
    }

    #[test]
    fn test_concurrent_change_during_replacement_is_kept() {
        let mut buffer = StringFBuffer::from("a-b");
        let mut writer = buffer.clone();
        let regex = Regex::new("-").unwrap();
        let mut calls = 0;
        buffer.replace_all_with(&regex, |_| {
            calls += 1;
            if calls == 1 {
                writer.append("!");
            }
            Some("+".to_string())
        });
        assert_eq!(buffer.to_text(), "a+b!");
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_stale_index_reports_error() {
        let mut buffer = StringFBuffer::from("abcdef");
        let mut other = buffer.clone();
        other.clear();
        assert!(buffer.delete(-3, 0).is_err());
        assert!(buffer.set_char_at(2, 'x').is_err());
        buffer.trim_trailing().remove_end("x");
        assert!(buffer.is_empty());
    }
}
