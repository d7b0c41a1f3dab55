//! Negative-index normalization and char/byte offset conversion.
//!
//! Text buffers address characters, not bytes. Every public index is an
//! `isize` where `-1` is the last character. For end-exclusive positions
//! `0` is ambiguous between "start" and "one past the end"; the `is_end`
//! flag resolves it to the end.

use std::ops::Range;

use crate::error::{KclError, Result};

/// Maps `index` onto the buffer: negative values count from `length`, and
/// `0` means `length` when `is_end` is set.
///
/// The result is not bounds checked.
///
/// ```
/// use kcommon::text::adjust_index;
///
/// assert_eq!(adjust_index(10, 3, false), 3);
/// assert_eq!(adjust_index(10, -1, false), 9);
/// assert_eq!(adjust_index(10, 0, true), 10);
/// assert_eq!(adjust_index(10, 0, false), 0);
/// ```
pub fn adjust_index(length: usize, index: isize, is_end: bool) -> isize {
    if index < 0 {
        length as isize + index
    } else if index == 0 && is_end {
        length as isize
    } else {
        index
    }
}

/// Normalizes `index` to an existing character position (`< length`).
pub(crate) fn position(length: usize, index: isize) -> Result<usize> {
    let adjusted = adjust_index(length, index, false);
    if adjusted < 0 || adjusted as usize >= length {
        return Err(KclError::IndexOutOfBounds { index, length });
    }
    Ok(adjusted as usize)
}

/// Normalizes `index` to a boundary between characters (`<= length`).
pub(crate) fn boundary(length: usize, index: isize, is_end: bool) -> Result<usize> {
    let adjusted = adjust_index(length, index, is_end);
    if adjusted < 0 || adjusted as usize > length {
        return Err(KclError::IndexOutOfBounds { index, length });
    }
    Ok(adjusted as usize)
}

/// Normalizes a `start..end` pair where `end == 0` means `length`.
pub(crate) fn range(length: usize, start: isize, end: isize) -> Result<(usize, usize)> {
    let start = boundary(length, start, false)?;
    let end = boundary(length, end, true)?;
    if start > end {
        return Err(KclError::InvalidRange { start, end, length });
    }
    Ok((start, end))
}

/// Normalizes a search origin. Negative values count from the end and are
/// clamped at `0`; values past the end are clamped to `length`.
pub(crate) fn search_origin(length: usize, from: isize) -> usize {
    adjust_index(length, from, false).clamp(0, length as isize) as usize
}

/// Byte offset of the character at `char_idx` (or `text.len()` past the end).
pub(crate) fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Character offset of the byte position `byte`.
pub(crate) fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Converts ordered, non-overlapping byte spans into char spans in one pass.
pub(crate) fn char_spans<I>(text: &str, spans: I, out: &mut Vec<(usize, usize)>)
where
    I: IntoIterator<Item = Range<usize>>,
{
    let mut byte = 0;
    let mut chars = 0;
    for span in spans {
        chars += text[byte..span.start].chars().count();
        let start = chars;
        chars += text[span.start..span.end].chars().count();
        byte = span.end;
        out.push((start, chars));
    }
}
