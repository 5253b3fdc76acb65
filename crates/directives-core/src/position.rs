//! Conversions between LSP positions and Rust string offsets.
//!
//! LSP counts `Position.character` in UTF-16 code units, while Rust strings
//! are indexed by byte. Directive lines are almost always ASCII, but package
//! descriptions pasted into comments are not, so every slice goes through
//! these helpers.

/// Returns the line at `line` (0-based), without its terminator.
///
/// # Examples
///
/// ```
/// # use directives_core::position::line_at;
/// let content = "#:sdk Microsoft.NET.Sdk\r\n#:package Humanizer\n";
/// assert_eq!(line_at(content, 1), Some("#:package Humanizer"));
/// assert_eq!(line_at(content, 5), None);
/// ```
pub fn line_at(content: &str, line: u32) -> Option<&str> {
    content.lines().nth(line as usize)
}

/// Converts UTF-16 offset to byte offset in a string.
///
/// # Returns
///
/// Byte offset if valid, `None` if the UTF-16 offset is out of bounds.
///
/// # Examples
///
/// ```
/// # use directives_core::position::utf16_to_byte_offset;
/// // ASCII: UTF-16 offset equals byte offset
/// assert_eq!(utf16_to_byte_offset("hello", 2), Some(2));
///
/// // "日本語" - each char is 3 bytes but 1 UTF-16 code unit
/// assert_eq!(utf16_to_byte_offset("日本語", 1), Some(3));
///
/// // "😀" is 4 bytes but 2 UTF-16 code units (surrogate pair)
/// assert_eq!(utf16_to_byte_offset("😀test", 2), Some(4));
/// ```
pub fn utf16_to_byte_offset(s: &str, utf16_offset: u32) -> Option<usize> {
    let mut utf16_count = 0u32;
    for (byte_idx, ch) in s.char_indices() {
        if utf16_count >= utf16_offset {
            return Some(byte_idx);
        }
        utf16_count += ch.len_utf16() as u32;
    }
    if utf16_count == utf16_offset {
        return Some(s.len());
    }
    None
}

/// Converts a byte offset into a UTF-16 column.
///
/// Offsets past the end of `s` clamp to its UTF-16 length; an offset inside
/// a multi-byte character counts that character as not yet reached.
///
/// # Examples
///
/// ```
/// # use directives_core::position::byte_to_utf16_offset;
/// assert_eq!(byte_to_utf16_offset("hello", 3), 3);
/// assert_eq!(byte_to_utf16_offset("😀test", 4), 2);
/// ```
pub fn byte_to_utf16_offset(s: &str, byte_offset: usize) -> u32 {
    s.char_indices()
        .take_while(|(idx, _)| *idx < byte_offset)
        .map(|(_, ch)| ch.len_utf16() as u32)
        .sum()
}
