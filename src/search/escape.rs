// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query escaping
//!
//! User text is embedded into RediSearch expressions, and text fields are
//! stored escaped in the index hashes. Every reserved character is prefixed
//! with a backslash marker:
//!
//! ```text
//! , . < > { } [ ] " : ; ! @ # $ % ^ & * ( ) - + = ~
//! ```
//!
//! `unescape` consumes exactly one marker per reserved character, so
//! `unescape(escape(s)) == s` for every `s`.

/// Marker inserted in front of reserved characters.
pub const ESCAPE_MARKER: char = '\\';

/// Returns true if `c` must be escaped inside a query expression.
#[inline]
pub fn is_reserved(c: char) -> bool {
    matches!(
        c,
        ',' | '.' | '<' | '>' | '{' | '}' | '[' | ']' | '"' | ':' | ';' | '!' | '@' | '#'
            | '$' | '%' | '^' | '&' | '*' | '(' | ')' | '-' | '+' | '=' | '~'
    )
}

/// Escape every reserved character with a backslash.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if is_reserved(c) {
            escaped.push(ESCAPE_MARKER);
        }
        escaped.push(c);
    }
    escaped
}

/// Remove the markers inserted by [`escape`].
///
/// A backslash only counts as a marker when the next character is reserved.
/// Any other backslash is literal text and is kept as-is.
pub fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE_MARKER {
            if let Some(&next) = chars.peek() {
                if is_reserved(next) {
                    unescaped.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        unescaped.push(c);
    }

    unescaped
}

/// Escape a value for a TAG field, where spaces are separators too.
pub fn escape_tag(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if is_reserved(c) || c == ' ' {
            escaped.push(ESCAPE_MARKER);
        }
        escaped.push(c);
    }
    escaped
}
