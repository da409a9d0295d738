//! Algorithms over immutable byte sequences.
//!
//! Index arguments follow slice conventions: `None` means "from the start" or
//! "to the end", negative values count from the end and everything is clamped
//! to the sequence.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::error::{CoreError, CoreResult};

const WHITESPACE: &[u8] = b" \t\n\r\x0b\x0c";

/// Lexical ordering over unsigned byte values.
///
/// The first differing byte within the common prefix decides, otherwise the
/// shorter sequence sorts first.
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    let common = a.len().min(b.len());

    for (x, y) in a[..common].iter().zip(&b[..common]) {
        if x != y {
            return x.cmp(y);
        }
    }

    a.len().cmp(&b.len())
}

/// Resolve optional, possibly negative bounds against a sequence of length `len`.
///
/// Returns `None` when the window is empty because `start` lies past the end
/// or past `end`.
pub fn normalize_range(len: usize, start: Option<i64>, end: Option<i64>) -> Option<(usize, usize)> {
    fn adjust(len: usize, index: i64) -> usize {
        if index < 0 {
            let back = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
            len.saturating_sub(back)
        } else {
            usize::try_from(index).unwrap_or(usize::MAX)
        }
    }

    let start = start.map_or(0, |n| adjust(len, n));
    let end = end.map_or(len, |n| adjust(len, n)).min(len);

    if start > len || start > end {
        return None;
    }

    Some((start, end))
}

/// Lowest index of `needle` within `haystack[start..end]`.
pub fn find(haystack: &[u8], needle: &[u8], start: Option<i64>, end: Option<i64>) -> Option<usize> {
    let (start, end) = normalize_range(haystack.len(), start, end)?;

    if needle.is_empty() {
        return Some(start);
    }

    haystack[start..end]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|n| n + start)
}

/// Lowest index of a single byte within `haystack[start..end]`.
pub fn find_byte(haystack: &[u8], byte: u8, start: Option<i64>, end: Option<i64>) -> Option<usize> {
    let (start, end) = normalize_range(haystack.len(), start, end)?;

    haystack[start..end]
        .iter()
        .position(|b| *b == byte)
        .map(|n| n + start)
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle, None, None).is_some()
}

pub fn starts_with(haystack: &[u8], prefix: &[u8], start: Option<i64>, end: Option<i64>) -> bool {
    normalize_range(haystack.len(), start, end)
        .map_or(false, |(start, end)| haystack[start..end].starts_with(prefix))
}

pub fn ends_with(haystack: &[u8], suffix: &[u8], start: Option<i64>, end: Option<i64>) -> bool {
    normalize_range(haystack.len(), start, end)
        .map_or(false, |(start, end)| haystack[start..end].ends_with(suffix))
}

/// Trim leading and trailing bytes found in `chars` (ASCII whitespace by default).
pub fn strip<'a>(bytes: &'a [u8], chars: Option<&[u8]>) -> &'a [u8] {
    let chars = chars.unwrap_or(WHITESPACE);

    let start = bytes
        .iter()
        .position(|b| !chars.contains(b))
        .unwrap_or(bytes.len());

    let end = bytes
        .iter()
        .rposition(|b| !chars.contains(b))
        .map_or(start, |n| n + 1);

    &bytes[start..end]
}

/// `bytes` concatenated `times` times; non-positive counts produce an empty sequence.
///
/// Results longer than `isize::MAX` are rejected up front and a failed
/// allocation is reported instead of aborting.
pub fn repeat(bytes: &[u8], times: i64) -> CoreResult<Vec<u8>> {
    if times <= 0 || bytes.is_empty() {
        return Ok(Vec::new());
    }

    let times = usize::try_from(times).map_err(|_| CoreError::RepeatOverflow)?;

    let len = bytes
        .len()
        .checked_mul(times)
        .filter(|len| *len <= isize::MAX as usize)
        .ok_or(CoreError::RepeatOverflow)?;

    let mut out = Vec::new();

    out.try_reserve_exact(len)
        .map_err(|_| CoreError::OutOfMemory(len))?;

    for _ in 0..times {
        out.extend_from_slice(bytes);
    }

    Ok(out)
}

pub fn join<'a, I>(separator: &[u8], parts: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut out = Vec::new();

    for (n, part) in parts.into_iter().enumerate() {
        if n > 0 {
            out.extend_from_slice(separator);
        }

        out.extend_from_slice(part);
    }

    out
}

/// Printable literal form, e.g. `b'ab\x00'`.
pub fn repr(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);

    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if char::from(byte) == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\x{:02x}", byte);
            }
        }
    }

    out.push(quote);
    out
}
