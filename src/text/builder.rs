//! Unsynchronized text buffer.

use std::fmt;
use std::str::FromStr;

use super::StringLike;

/// An owned, unsynchronized [`StringLike`] buffer.
///
/// Keeps the character count alongside the UTF-8 content, so pure ASCII
/// content maps character positions to bytes without scanning.
///
/// ```
/// use kcommon::{StringFBuilder, StringLike};
///
/// let mut sb = StringFBuilder::new();
/// sb.append("a").append_char('-').append_display(42);
/// sb.insert(-1, "x")?;
/// assert_eq!(sb, "a-4x2");
/// # Ok::<(), kcommon::KclError>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringFBuilder {
    text: String,
    chars: usize,
}

impl StringFBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            chars: 0,
        }
    }

    /// Borrows the content.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the builder, returning its content.
    pub fn into_string(self) -> String {
        self.text
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        if self.chars == self.text.len() {
            char_idx
        } else {
            super::index::byte_offset(&self.text, char_idx)
        }
    }
}

impl StringLike for StringFBuilder {
    fn len(&self) -> usize {
        self.chars
    }

    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.text)
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        debug_assert!(start <= end && end <= self.chars);
        let from = self.byte_at(start);
        let to = self.byte_at(end);
        self.text.replace_range(from..to, replacement);
        self.chars = self.chars - (end - start) + replacement.chars().count();
    }

    fn capacity(&self) -> usize {
        self.text.capacity()
    }

    fn reserve(&mut self, additional: usize) -> &mut Self {
        self.text.reserve(additional);
        self
    }

    fn shrink_to_fit(&mut self) -> &mut Self {
        self.text.shrink_to_fit();
        self
    }

    fn to_text(&self) -> String {
        self.text.clone()
    }

    fn clear(&mut self) -> &mut Self {
        self.text.clear();
        self.chars = 0;
        self
    }

    fn append(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self.chars += text.chars().count();
        self
    }
}

impl From<&str> for StringFBuilder {
    fn from(text: &str) -> Self {
        Self::from(text.to_owned())
    }
}

impl From<String> for StringFBuilder {
    fn from(text: String) -> Self {
        let chars = text.chars().count();
        Self { text, chars }
    }
}

impl From<StringFBuilder> for String {
    fn from(builder: StringFBuilder) -> Self {
        builder.text
    }
}

impl FromStr for StringFBuilder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl AsRef<str> for StringFBuilder {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for StringFBuilder {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for StringFBuilder {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Write for StringFBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}

impl fmt::Display for StringFBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for StringFBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text, f)
    }
}
