//! Position-checked string edits.
//!
//! Positions are byte offsets. Every offset must satisfy
//! `0 <= start <= end <= len` and fall on a character boundary, otherwise
//! the edit fails with [`Error::InvalidRange`].

use crate::error::{Error, Result};

fn check_range(original: &str, start: usize, end: usize) -> Result<()> {
    let valid = start <= end
        && end <= original.len()
        && original.is_char_boundary(start)
        && original.is_char_boundary(end);
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            start,
            end,
            len: original.len(),
        })
    }
}

/// Insert `insertion` at byte offset `position`.
pub fn insert_at(original: &str, insertion: &str, position: usize) -> Result<String> {
    replace_range(original, insertion, position, position)
}

/// Replace occurrences of `old` with `new`, left to right.
///
/// `None` replaces every occurrence; `Some(n)` at most the first `n`.
///
/// # Examples
///
/// ```
/// use pdf_retext::text::replace_occurrences;
///
/// assert_eq!(replace_occurrences("Hello world, world", "world", "Python", None), "Hello Python, Python");
/// assert_eq!(replace_occurrences("Hello world, world", "world", "Python", Some(1)), "Hello Python, world");
/// ```
pub fn replace_occurrences(original: &str, old: &str, new: &str, limit: Option<usize>) -> String {
    match limit {
        None => original.replace(old, new),
        Some(count) => original.replacen(old, new, count),
    }
}

/// Replace the bytes `start..end` with `replacement`.
pub fn replace_range(original: &str, replacement: &str, start: usize, end: usize) -> Result<String> {
    check_range(original, start, end)?;
    let mut out = String::with_capacity(original.len() - (end - start) + replacement.len());
    out.push_str(&original[..start]);
    out.push_str(replacement);
    out.push_str(&original[end..]);
    Ok(out)
}

/// Remove the bytes `start..end`.
pub fn delete_range(original: &str, start: usize, end: usize) -> Result<String> {
    replace_range(original, "", start, end)
}
