//! Locating the word or mention that overlaps a caret position.
//!
//! The editor surface owns the caret; it hands us a text value and a
//! character offset, and we compute the token around it. Callers use this to
//! detect that the author is mid-typing a mention (the term before the caret
//! starts with `@`) and, on confirmation, to know the exact span to
//! overwrite with the inserted mention.
//!
//! All offsets are character indices, not byte indices.

use margin_types::WordOffsets;

use crate::syntax::is_boundary_char;

/// Returns the `start` and `end` offsets for the word or mention that
/// overlaps the given position.
///
/// The span expands left from `position` to the nearest boundary character
/// (exclusive) or the start of the text, and right to the nearest boundary
/// character (exclusive) or the end of the text.
///
/// For example, given the text `"hello @hypothesis"` and position 9, it
/// returns the span of the `@hypothesis` mention: `{ start: 6, end: 17 }`.
pub fn containing_offsets(text: &str, position: usize) -> WordOffsets {
    let chars: Vec<char> = text.chars().collect();
    let position = position.min(chars.len());

    let start = chars[..position]
        .iter()
        .rposition(|c| is_boundary_char(*c))
        .map_or(0, |i| i + 1);
    let end = chars[position..]
        .iter()
        .position(|c| is_boundary_char(*c))
        .map_or(chars.len(), |i| position + i);

    WordOffsets { start, end }
}

/// Returns the portion of the word at `position` that lies before it.
pub fn term_before_position(text: &str, position: usize) -> String {
    let WordOffsets { start, .. } = containing_offsets(text, position);
    text.chars()
        .skip(start)
        .take(position.saturating_sub(start))
        .collect()
}

/// Returns the partial mention being typed at `position`, without its
/// leading `@`.
///
/// `None` means the caret is not inside a mention and no suggestions should
/// be offered. `Some("")` means the author just typed `@`.
pub fn active_mention(text: &str, position: usize) -> Option<String> {
    term_before_position(text, position)
        .strip_prefix('@')
        .map(str::to_string)
}
