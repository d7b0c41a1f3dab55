//! The `StringLike` trait: a mutable, negative-index aware text buffer.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use regex::Regex;
use tracing::trace;

use super::index::{self, byte_offset, char_offset, char_spans};
use crate::error::{KclError, Result};
use crate::pool::buckets;

/// Which side(s) [`StringLike::trim_chars`] works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrimSide {
    /// Only the beginning.
    Leading,
    /// Only the end.
    Trailing,
    /// Both ends.
    #[default]
    Both,
}

/// A builder-like mutable character buffer.
///
/// Indices are character positions (not bytes) and may be negative, in
/// which case they count from the end: `-1` is the last character. For
/// end-exclusive positions `0` means "the end", so `delete(-2, 0)`
/// removes the last two characters.
///
/// Implementors supply a handful of primitives; everything else is
/// provided on top of them.
///
/// ```
/// use kcommon::{StringFBuilder, StringLike};
///
/// let mut sb = StringFBuilder::from("hello world");
/// sb.delete(-6, 0)?.append("!").first_up();
/// assert_eq!(sb.to_text(), "Hello!");
/// # Ok::<(), kcommon::KclError>(())
/// ```
pub trait StringLike {
    /// Number of characters.
    fn len(&self) -> usize;

    /// Runs `f` with the current content.
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R;

    /// Replaces the characters `start..end` with `replacement`.
    ///
    /// Positions are already normalized and satisfy
    /// `start <= end <= len()`.
    fn splice(&mut self, start: usize, end: usize, replacement: &str);

    /// Allocated capacity in bytes.
    fn capacity(&self) -> usize;

    /// Reserves room for at least `additional` more bytes.
    fn reserve(&mut self, additional: usize) -> &mut Self;

    /// Releases unused capacity.
    fn shrink_to_fit(&mut self) -> &mut Self;

    /// Returns true if the buffer holds no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the content into a new `String`.
    fn to_text(&self) -> String {
        self.with_text(str::to_owned)
    }

    /// Removes all characters.
    fn clear(&mut self) -> &mut Self {
        let len = self.len();
        self.splice(0, len, "");
        self
    }

    /// Truncates, or pads with `'\0'`, to exactly `new_length` characters.
    fn set_length(&mut self, new_length: usize) -> &mut Self {
        let len = self.len();
        if new_length < len {
            self.splice(new_length, len, "");
        } else if new_length > len {
            self.append_filling(new_length - len, '\0');
        }
        self
    }

    // ------------------------------------------------------------------
    // characters and ranges
    // ------------------------------------------------------------------

    /// Returns the character at `index`.
    fn char_at(&self, index: isize) -> Result<char> {
        let length = self.len();
        let pos = index::position(length, index)?;
        self.with_text(|t| t.chars().nth(pos))
            .ok_or(KclError::IndexOutOfBounds { index, length })
    }

    /// Overwrites the character at `index`.
    fn set_char_at(&mut self, index: isize, ch: char) -> Result<&mut Self> {
        let pos = index::position(self.len(), index)?;
        let mut buf = [0u8; 4];
        self.splice(pos, pos + 1, ch.encode_utf8(&mut buf));
        Ok(self)
    }

    /// Appends text.
    fn append(&mut self, text: &str) -> &mut Self {
        let len = self.len();
        self.splice(len, len, text);
        self
    }

    /// Appends a single character.
    fn append_char(&mut self, ch: char) -> &mut Self {
        let mut buf = [0u8; 4];
        self.append(ch.encode_utf8(&mut buf))
    }

    /// Appends the `Display` form of `value`.
    fn append_display(&mut self, value: impl fmt::Display) -> &mut Self {
        self.append(&value.to_string())
    }

    /// Appends formatted text, e.g. `sb.append_fmt(format_args!("{x}"))`.
    fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        match args.as_str() {
            Some(text) => self.append(text),
            None => self.append(&fmt::format(args)),
        }
    }

    /// Appends `count` copies of `ch`.
    fn append_filling(&mut self, count: usize, ch: char) -> &mut Self {
        let filling: String = std::iter::repeat_n(ch, count).collect();
        self.append(&filling)
    }

    /// Inserts text before the character at `index` (`len()` appends).
    fn insert(&mut self, index: isize, text: &str) -> Result<&mut Self> {
        let pos = index::boundary(self.len(), index, false)?;
        self.splice(pos, pos, text);
        Ok(self)
    }

    /// Inserts a single character.
    fn insert_char(&mut self, index: isize, ch: char) -> Result<&mut Self> {
        let mut buf = [0u8; 4];
        self.insert(index, ch.encode_utf8(&mut buf))
    }

    /// Inserts formatted text.
    fn insert_fmt(&mut self, index: isize, args: fmt::Arguments<'_>) -> Result<&mut Self> {
        match args.as_str() {
            Some(text) => self.insert(index, text),
            None => self.insert(index, &fmt::format(args)),
        }
    }

    /// Removes the characters `start..end`.
    fn delete(&mut self, start: isize, end: isize) -> Result<&mut Self> {
        let (start, end) = index::range(self.len(), start, end)?;
        self.splice(start, end, "");
        Ok(self)
    }

    /// Removes the character at `index`.
    fn delete_char_at(&mut self, index: isize) -> Result<&mut Self> {
        let pos = index::position(self.len(), index)?;
        self.splice(pos, pos + 1, "");
        Ok(self)
    }

    /// Replaces the characters `start..end` with `text`.
    fn replace_range(&mut self, start: isize, end: isize, text: &str) -> Result<&mut Self> {
        let (start, end) = index::range(self.len(), start, end)?;
        self.splice(start, end, text);
        Ok(self)
    }

    /// Returns the characters from `start` to the end.
    fn substring(&self, start: isize) -> Result<String> {
        let start = index::boundary(self.len(), start, false)?;
        Ok(self.with_text(|t| t[byte_offset(t, start)..].to_owned()))
    }

    /// Returns the characters `start..end`.
    fn substring_range(&self, start: isize, end: isize) -> Result<String> {
        let (start, end) = index::range(self.len(), start, end)?;
        Ok(self.with_text(|t| slice_chars(t, start, end).to_owned()))
    }

    /// Reverses the character order.
    fn reverse(&mut self) -> &mut Self {
        let reversed: String = self.with_text(|t| t.chars().rev().collect());
        let len = self.len();
        self.splice(0, len, &reversed);
        self
    }

    // ------------------------------------------------------------------
    // searching
    // ------------------------------------------------------------------

    /// Position of the first occurrence of `needle`.
    fn index_of(&self, needle: &str) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// Position of the first occurrence of `needle` at or after `from`.
    fn index_of_from(&self, needle: &str, from: isize) -> Option<usize> {
        let from = index::search_origin(self.len(), from);
        self.with_text(|t| {
            let tail = &t[byte_offset(t, from)..];
            tail.find(needle).map(|b| from + char_offset(tail, b))
        })
    }

    /// Smallest position at or after `from` holding one of `chars`.
    fn index_of_any_char(&self, chars: &[char], from: isize) -> Option<usize> {
        let from = index::search_origin(self.len(), from);
        self.with_text(|t| {
            t.chars()
                .skip(from)
                .position(|c| chars.contains(&c))
                .map(|p| p + from)
        })
    }

    /// Smallest position at or after `from` where one of `needles` starts.
    fn index_of_any(&self, needles: &[&str], from: isize) -> Option<usize> {
        needles
            .iter()
            .filter_map(|needle| self.index_of_from(needle, from))
            .min()
    }

    /// Position of the last occurrence of `needle`.
    fn last_index_of(&self, needle: &str) -> Option<usize> {
        self.with_text(|t| t.rfind(needle).map(|b| char_offset(t, b)))
    }

    /// Position of the last occurrence of `needle` starting at or before
    /// `from`.
    fn last_index_of_from(&self, needle: &str, from: isize) -> Option<usize> {
        let len = self.len();
        let from = index::adjust_index(len, from, false);
        if from < 0 {
            return None;
        }
        let limit = (from as usize).saturating_add(needle.chars().count()).min(len);
        self.with_text(|t| {
            let head = &t[..byte_offset(t, limit)];
            head.rfind(needle).map(|b| char_offset(head, b))
        })
    }

    /// Largest position holding one of `chars`.
    fn last_index_of_any_char(&self, chars: &[char]) -> Option<usize> {
        self.with_text(|t| {
            let count = t.chars().count();
            t.chars()
                .rev()
                .position(|c| chars.contains(&c))
                .map(|p| count - 1 - p)
        })
    }

    /// Largest position where one of `needles` starts.
    fn last_index_of_any(&self, needles: &[&str]) -> Option<usize> {
        needles
            .iter()
            .filter_map(|needle| self.last_index_of(needle))
            .max()
    }

    // ------------------------------------------------------------------
    // comparison
    // ------------------------------------------------------------------

    /// Returns true if the content starts with `prefix`.
    fn starts_with(&self, prefix: &str) -> bool {
        self.with_text(|t| t.starts_with(prefix))
    }

    /// Case-insensitive [`starts_with`](Self::starts_with).
    fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        let count = prefix.chars().count();
        self.with_text(|t| {
            t.chars().count() >= count && eq_ignore_case(slice_chars(t, 0, count), prefix)
        })
    }

    /// Returns the first candidate the content starts with.
    fn starts_with_many<'a>(&self, case_sensitive: bool, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| {
            if case_sensitive {
                self.starts_with(c)
            } else {
                self.starts_with_ignore_case(c)
            }
        })
    }

    /// Returns true if the content ends with `suffix`.
    fn ends_with(&self, suffix: &str) -> bool {
        self.with_text(|t| t.ends_with(suffix))
    }

    /// Case-insensitive [`ends_with`](Self::ends_with).
    fn ends_with_ignore_case(&self, suffix: &str) -> bool {
        let count = suffix.chars().count();
        self.with_text(|t| {
            let len = t.chars().count();
            len >= count && eq_ignore_case(slice_chars(t, len - count, len), suffix)
        })
    }

    /// Returns the first candidate the content ends with.
    fn ends_with_many<'a>(&self, case_sensitive: bool, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| {
            if case_sensitive {
                self.ends_with(c)
            } else {
                self.ends_with_ignore_case(c)
            }
        })
    }

    /// Returns true if the content equals `other`.
    fn equals(&self, other: &str) -> bool {
        self.with_text(|t| t == other)
    }

    /// Case-insensitive [`equals`](Self::equals).
    fn equals_ignore_case(&self, other: &str) -> bool {
        self.with_text(|t| eq_ignore_case(t, other))
    }

    // ------------------------------------------------------------------
    // trimming
    // ------------------------------------------------------------------

    /// Removes leading whitespace.
    fn trim_leading(&mut self) -> &mut Self {
        let count = self.with_text(|t| t.chars().take_while(|c| c.is_whitespace()).count());
        self.splice(0, count, "");
        self
    }

    /// Removes trailing whitespace.
    fn trim_trailing(&mut self) -> &mut Self {
        let count = self.with_text(|t| t.chars().rev().take_while(|c| c.is_whitespace()).count());
        let len = self.len();
        self.splice(len - count, len, "");
        self
    }

    /// Removes leading and trailing whitespace.
    fn trim(&mut self) -> &mut Self {
        self.trim_leading().trim_trailing()
    }

    /// Removes any of `chars` from the given side(s).
    fn trim_chars(&mut self, chars: &str, side: TrimSide) -> &mut Self {
        if side != TrimSide::Trailing {
            let count = self.with_text(|t| t.chars().take_while(|c| chars.contains(*c)).count());
            self.splice(0, count, "");
        }
        if side != TrimSide::Leading {
            let count =
                self.with_text(|t| t.chars().rev().take_while(|c| chars.contains(*c)).count());
            let len = self.len();
            self.splice(len - count, len, "");
        }
        self
    }

    /// Removes every occurrence of any of `chars`.
    fn remove_chars(&mut self, chars: &str) -> &mut Self {
        let kept: String = self.with_text(|t| t.chars().filter(|c| !chars.contains(*c)).collect());
        let len = self.len();
        self.splice(0, len, &kept);
        self
    }

    /// Removes `prefix` if the content starts with it.
    fn remove_start(&mut self, prefix: &str) -> &mut Self {
        if !prefix.is_empty() && self.starts_with(prefix) {
            self.splice(0, prefix.chars().count(), "");
        }
        self
    }

    /// Removes `suffix` if the content ends with it.
    fn remove_end(&mut self, suffix: &str) -> &mut Self {
        if !suffix.is_empty() && self.ends_with(suffix) {
            let len = self.len();
            self.splice(len - suffix.chars().count(), len, "");
        }
        self
    }

    /// Appends `suffix` unless the content already ends with it.
    fn append_if_missing(&mut self, suffix: &str) -> &mut Self {
        if !self.ends_with(suffix) {
            self.append(suffix);
        }
        self
    }

    /// Prepends `prefix` unless the content already starts with it.
    fn prepend_if_missing(&mut self, prefix: &str) -> &mut Self {
        if !self.starts_with(prefix) {
            self.splice(0, 0, prefix);
        }
        self
    }

    // ------------------------------------------------------------------
    // splitting
    // ------------------------------------------------------------------

    /// Splits at any of the `delimiters` characters, dropping empty tokens.
    fn split(&self, delimiters: &str) -> Vec<String> {
        self.with_text(|t| {
            t.split(|c| delimiters.contains(c))
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect()
        })
    }

    /// Splits at matches of `pattern`. See [`split_with`](Self::split_with).
    fn split_regex(&self, pattern: &str) -> Result<Vec<String>> {
        let regex = Regex::new(pattern)?;
        Ok(self.split_with(&regex))
    }

    /// Splits at matches of `regex`.
    ///
    /// Empty pieces between adjacent matches are dropped. Without any
    /// match the whole content is the only piece.
    fn split_with(&self, regex: &Regex) -> Vec<String> {
        self.with_text(|t| {
            let mut pieces = Vec::new();
            let mut last = 0;
            let mut matched = false;
            for m in regex.find_iter(t) {
                matched = true;
                if m.start() > last {
                    pieces.push(t[last..m.start()].to_owned());
                }
                last = m.end();
            }
            if !matched {
                pieces.push(t.to_owned());
            } else if last < t.len() {
                pieces.push(t[last..].to_owned());
            }
            pieces
        })
    }

    // ------------------------------------------------------------------
    // replacing
    // ------------------------------------------------------------------

    /// Replaces every `from` character with `to`.
    fn replace_char(&mut self, from: char, to: char) -> &mut Self {
        let replaced: String = self.with_text(|t| {
            t.chars()
                .map(|c| if c == from { to } else { c })
                .collect()
        });
        let len = self.len();
        self.splice(0, len, &replaced);
        self
    }

    /// Replaces every non-overlapping occurrence of `search` literally.
    fn replace_literally_all(&mut self, search: &str, replacement: &str) -> &mut Self {
        if search.is_empty() {
            return self;
        }
        let mut spans = buckets::vec::<(usize, usize)>().take();
        self.with_text(|t| {
            let found = t.match_indices(search).map(|(b, m)| b..b + m.len());
            char_spans(t, found, &mut spans);
        });
        for &(start, end) in spans.iter().rev() {
            self.splice(start, end, replacement);
        }
        self
    }

    /// Replaces every match of `pattern` with the literal `replacement`.
    fn replace_all(&mut self, pattern: &str, replacement: &str) -> Result<&mut Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.replace_all_regex(&regex, replacement))
    }

    /// Replaces every match of `regex` with the literal `replacement`.
    ///
    /// Matches are collected left to right first and substituted right to
    /// left, so earlier positions stay valid.
    fn replace_all_regex(&mut self, regex: &Regex, replacement: &str) -> &mut Self {
        let mut spans = buckets::vec::<(usize, usize)>().take();
        self.with_text(|t| {
            let found = regex.find_iter(t).map(|m| m.range());
            char_spans(t, found, &mut spans);
        });
        for &(start, end) in spans.iter().rev() {
            self.splice(start, end, replacement);
        }
        self
    }

    /// Replaces every match of `regex` with what `replacer` returns for it.
    ///
    /// `replacer` sees the matches in order from left to right, so it may
    /// keep state. Returning `None` deletes the match. It runs after the
    /// content has been scanned, never while it is borrowed.
    fn replace_all_with<F>(&mut self, regex: &Regex, mut replacer: F) -> &mut Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut spans = buckets::vec::<(usize, usize)>().take();
        let mut matched = buckets::vec::<String>().take();
        self.with_text(|t| {
            let found: Vec<_> = regex.find_iter(t).collect();
            matched.extend(found.iter().map(|m| m.as_str().to_owned()));
            char_spans(t, found.iter().map(|m| m.range()), &mut spans);
        });
        let mut substitutions = buckets::vec::<Option<String>>().take();
        substitutions.extend(matched.iter().map(|m| replacer(m)));
        for (&(start, end), value) in spans.iter().zip(substitutions.iter()).rev() {
            self.splice(start, end, value.as_deref().unwrap_or(""));
        }
        self
    }

    /// Replaces every occurrence of a key of `replacements` with its value.
    ///
    /// With a `template` each key is first rendered into it, replacing
    /// `{}`; e.g. the template `"${}"` turns the key `name` into `$name`.
    /// All keys are matched in a single scan; a longer key wins over a key
    /// that is its prefix. A template without `{}` is rejected, since it
    /// would render every key the same.
    fn replace_all_map<K, V>(
        &mut self,
        replacements: &HashMap<K, V>,
        template: Option<&str>,
    ) -> Result<&mut Self>
    where
        K: AsRef<str> + Eq + Hash,
        V: AsRef<str>,
    {
        if let Some(template) = template.filter(|t| !t.contains("{}")) {
            return Err(KclError::InvalidTemplate {
                template: template.to_owned(),
            });
        }
        if replacements.is_empty() {
            return Ok(self);
        }

        let mut substitutions = buckets::hash_map::<String, String>().take();
        for (key, value) in replacements {
            let key = match template {
                Some(template) => template.replace("{}", key.as_ref()),
                None => key.as_ref().to_owned(),
            };
            substitutions.insert(key, value.as_ref().to_owned());
        }

        let mut keys: Vec<&String> = substitutions.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!("({alternation})"))?;

        Ok(self.replace_all_with(&regex, |key| substitutions.get(key).cloned()))
    }

    /// Replaces the first match of `pattern`.
    fn replace_first(&mut self, pattern: &str, replacement: &str) -> Result<&mut Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.replace_first_regex(&regex, replacement))
    }

    /// Replaces the first match of `regex`.
    fn replace_first_regex(&mut self, regex: &Regex, replacement: &str) -> &mut Self {
        let span = self.with_text(|t| {
            regex
                .find(t)
                .map(|m| (char_offset(t, m.start()), char_offset(t, m.end())))
        });
        if let Some((start, end)) = span {
            self.splice(start, end, replacement);
        }
        self
    }

    /// Replaces the last match of `pattern`.
    fn replace_last(&mut self, pattern: &str, replacement: &str) -> Result<&mut Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.replace_last_regex(&regex, replacement))
    }

    /// Replaces the last match of `regex`.
    fn replace_last_regex(&mut self, regex: &Regex, replacement: &str) -> &mut Self {
        let span = self.with_text(|t| {
            regex
                .find_iter(t)
                .last()
                .map(|m| (char_offset(t, m.start()), char_offset(t, m.end())))
        });
        if let Some((start, end)) = span {
            self.splice(start, end, replacement);
        }
        self
    }

    /// Replaces every delimited region (delimiters included) with
    /// `replacement`. `close` defaults to `open`.
    fn replace_regions(&mut self, open: &str, close: Option<&str>, replacement: &str) -> &mut Self {
        self.replace_regions_with(open, close, |_| Some(replacement.to_owned()))
    }

    /// Replaces every delimited region with what `replacer` returns for its
    /// inner text. `close` defaults to `open`.
    ///
    /// Scanning resumes after the inserted text, so replacements are never
    /// reprocessed. `None` removes the region. An `open` without a
    /// matching `close` ends the scan and leaves the rest untouched.
    ///
    /// ```
    /// use kcommon::{StringFBuilder, StringLike};
    ///
    /// let mut sb = StringFBuilder::from("a(*hello*)b");
    /// sb.replace_regions_with("(*", Some("*)"), |inner| Some(inner.to_uppercase()));
    /// assert_eq!(sb.to_text(), "aHELLOb");
    /// ```
    fn replace_regions_with<F>(&mut self, open: &str, close: Option<&str>, mut replacer: F) -> &mut Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        if open.is_empty() {
            return self;
        }
        let close = close.filter(|c| !c.is_empty()).unwrap_or(open);
        let open_len = open.chars().count();
        let close_len = close.chars().count();

        let mut start = 0;
        while let Some(idx_open) = self.index_of_from(open, start as isize) {
            let inner_start = idx_open + open_len;
            let Some(idx_close) = self.index_of_from(close, inner_start as isize) else {
                trace!(position = idx_open, "unterminated region");
                break;
            };
            let inner = self.with_text(|t| slice_chars(t, inner_start, idx_close).to_owned());
            let value = replacer(&inner);
            let value = value.as_deref().unwrap_or("");
            self.splice(idx_open, idx_close + close_len, value);
            start = idx_open + value.chars().count();
        }
        self
    }

    // ------------------------------------------------------------------
    // case
    // ------------------------------------------------------------------

    /// Upper-cases the first character.
    fn first_up(&mut self) -> &mut Self {
        let first = self.with_text(|t| t.chars().next());
        if let Some(first) = first {
            let upper: String = first.to_uppercase().collect();
            self.splice(0, 1, &upper);
        }
        self
    }

    /// Lower-cases the first character.
    fn first_down(&mut self) -> &mut Self {
        let first = self.with_text(|t| t.chars().next());
        if let Some(first) = first {
            let lower: String = first.to_lowercase().collect();
            self.splice(0, 1, &lower);
        }
        self
    }

    /// Converts separated words to camel case.
    ///
    /// Scanning right to left, every non-letter is removed and the
    /// character after it is upper-cased. Finally the first character is
    /// lower-cased.
    ///
    /// ```
    /// use kcommon::{StringFBuilder, StringLike};
    ///
    /// let mut sb = StringFBuilder::from("hello_world_foo");
    /// assert_eq!(sb.camel_case().to_text(), "helloWorldFoo");
    /// ```
    fn camel_case(&mut self) -> &mut Self {
        let mut chars: Vec<char> = self.with_text(|t| t.chars().collect());
        for i in (0..chars.len().saturating_sub(1)).rev() {
            if !chars[i].is_alphabetic() {
                chars[i + 1] = upper_char(chars[i + 1]);
                chars.remove(i);
            }
        }
        let camel: String = chars.into_iter().collect();
        let len = self.len();
        self.splice(0, len, &camel);
        self.first_down()
    }

    /// Lower-cases the whole content.
    fn to_lower_case(&mut self) -> &mut Self {
        let lower = self.with_text(str::to_lowercase);
        let len = self.len();
        self.splice(0, len, &lower);
        self
    }

    /// Upper-cases the whole content.
    fn to_upper_case(&mut self) -> &mut Self {
        let upper = self.with_text(str::to_uppercase);
        let len = self.len();
        self.splice(0, len, &upper);
        self
    }
}

/// The characters `start..end` of `text` as a slice.
pub(crate) fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = from + byte_offset(&text[from..], end - start);
    &text[from..to]
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Single-char upper-casing; multi-char expansions keep the original.
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
