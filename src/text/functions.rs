//! Free text helpers.
//!
//! Each helper borrows a [`StringFBuilder`] from the shared bucket, runs
//! the matching [`StringLike`] operation and returns the result as a new
//! `String`.

use std::collections::HashMap;
use std::hash::Hash;

use super::{StringFBuilder, StringLike, TrimSide};
use crate::error::Result;
use crate::pool::buckets;

fn with_builder<R>(input: &str, f: impl FnOnce(&mut StringFBuilder) -> R) -> R {
    buckets::string_fbuilder().for_instance(|sb| {
        sb.append(input);
        f(sb)
    })
}

/// Strips the suffix (including the dot) from a file name.
///
/// ```
/// use kcommon::text::functions::remove_suffix;
///
/// assert_eq!(remove_suffix("archive.tar.gz"), "archive.tar");
/// assert_eq!(remove_suffix("README"), "README");
/// ```
pub fn remove_suffix(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Replaces (or adds) the suffix of a file name.
pub fn change_suffix(name: &str, suffix: &str) -> String {
    format!("{}.{}", remove_suffix(name), suffix)
}

/// Trims control characters and spaces; returns `None` if nothing is left.
pub fn cleanup(input: Option<&str>) -> Option<String> {
    input
        .map(|text| text.trim_matches(|c: char| c <= ' '))
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Upper-cases the first character.
pub fn first_up(input: &str) -> String {
    with_builder(input, |sb| sb.first_up().to_text())
}

/// Lower-cases the first character.
pub fn first_down(input: &str) -> String {
    with_builder(input, |sb| sb.first_down().to_text())
}

/// Replaces every occurrence of `search` literally.
pub fn replace_literally_all(input: &str, search: &str, replacement: &str) -> String {
    with_builder(input, |sb| sb.replace_literally_all(search, replacement).to_text())
}

/// Replaces all keys of `replacements`, optionally rendered into
/// `template` (`{}` stands for the key).
///
/// ```
/// use std::collections::HashMap;
/// use kcommon::text::functions::replace_all_map;
///
/// let vars = HashMap::from([("name", "World")]);
/// let out = replace_all_map("Hello ${name}!", &vars, Some("${{}}"))?;
/// assert_eq!(out, "Hello World!");
/// # Ok::<(), kcommon::KclError>(())
/// ```
pub fn replace_all_map<K, V>(
    input: &str,
    replacements: &HashMap<K, V>,
    template: Option<&str>,
) -> Result<String>
where
    K: AsRef<str> + Eq + Hash,
    V: AsRef<str>,
{
    with_builder(input, |sb| {
        sb.replace_all_map(replacements, template)
            .map(|sb| sb.to_text())
    })
}

/// Converts separated words to camel case.
pub fn camel_case(input: &str) -> String {
    with_builder(input, |sb| sb.camel_case().to_text())
}

/// Replaces every region delimited by `open`/`close` with `replacement`.
pub fn replace_regions(input: &str, open: &str, close: Option<&str>, replacement: &str) -> String {
    with_builder(input, |sb| sb.replace_regions(open, close, replacement).to_text())
}

/// Replaces every region delimited by `open`/`close` with the result of
/// `replacer` for its inner text.
pub fn replace_regions_with<F>(input: &str, open: &str, close: Option<&str>, replacer: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    with_builder(input, |sb| sb.replace_regions_with(open, close, replacer).to_text())
}

/// Returns the first candidate `input` starts with.
pub fn starts_with_many<'a>(input: &str, case_sensitive: bool, candidates: &[&'a str]) -> Option<&'a str> {
    with_builder(input, |sb| sb.starts_with_many(case_sensitive, candidates))
}

/// Returns the first candidate `input` ends with.
pub fn ends_with_many<'a>(input: &str, case_sensitive: bool, candidates: &[&'a str]) -> Option<&'a str> {
    with_builder(input, |sb| sb.ends_with_many(case_sensitive, candidates))
}

/// Removes any of `chars` from the given side(s).
pub fn trim_chars(input: &str, chars: &str, side: TrimSide) -> String {
    with_builder(input, |sb| sb.trim_chars(chars, side).to_text())
}

/// Joins the non-empty parts with `delimiter`.
///
/// ```
/// use kcommon::text::functions::concatenate;
///
/// assert_eq!(concatenate(", ", ["a", "", "b"]), "a, b");
/// ```
pub fn concatenate<I, S>(delimiter: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    buckets::string_fbuilder().for_instance(|sb| {
        for part in parts {
            let part = part.as_ref();
            if part.is_empty() {
                continue;
            }
            if !sb.is_empty() {
                sb.append(delimiter);
            }
            sb.append(part);
        }
        sb.to_text()
    })
}

/// Repeats `text` `n` times.
pub fn repeat(n: usize, text: &str) -> String {
    if n == 0 || text.is_empty() {
        return String::new();
    }
    buckets::string_fbuilder().for_instance(|sb| {
        for _ in 0..n {
            sb.append(text);
        }
        sb.to_text()
    })
}

/// A string of `count` copies of `ch`.
pub fn fill_string(count: usize, ch: char) -> String {
    buckets::string_fbuilder().for_instance(|sb| sb.append_filling(count, ch).to_text())
}

/// Pads `text` with `pad` up to `limit` characters, on the left if `left`
/// is set, otherwise on the right. Longer text is returned unchanged;
/// `None` yields `limit` pad characters.
///
/// ```
/// use kcommon::text::functions::padding;
///
/// assert_eq!(padding(Some("ab"), 5, '*', true), "***ab");
/// assert_eq!(padding(Some("ab"), 5, '*', false), "ab***");
/// ```
pub fn padding(text: Option<&str>, limit: usize, pad: char, left: bool) -> String {
    let Some(text) = text else {
        return fill_string(limit, pad);
    };
    let len = text.chars().count();
    if len >= limit {
        return text.to_owned();
    }
    with_builder(text, |sb| {
        let fill = fill_string(limit - len, pad);
        if left {
            sb.splice(0, 0, &fill);
        } else {
            sb.append(&fill);
        }
        sb.to_text()
    })
}
