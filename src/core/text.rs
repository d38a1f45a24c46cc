//! Per-line text mutators: literal substring replacement and ASCII
//! case-insensitive search.

use log::{debug, warn};

/// Default bound on replacements per line in global mode
pub const DEFAULT_REPLACE_LIMIT: usize = 1024;

/// A parsed `/old/new/[g]` substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
    pub global: bool,
}

impl Substitution {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>, global: bool) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            global,
        }
    }
}

/// Replace occurrences of `sub.pattern` in `line` with `sub.replacement`.
///
/// Matching is literal and case-sensitive. In global mode the scan resumes
/// right after each inserted replacement, so a replacement containing the
/// pattern is never rescanned. At most `limit` replacements are made.
///
/// A splice that would push the line past `max_len` characters stops the
/// scan; replacements applied before it are kept. An empty pattern makes
/// no replacements. Returns the number of replacements made.
pub fn replace_in_line(line: &mut String, sub: &Substitution, max_len: usize, limit: usize) -> usize {
    let pattern = sub.pattern.as_str();
    let replacement = sub.replacement.as_str();
    if pattern.is_empty() {
        return 0;
    }

    let pattern_chars = pattern.chars().count();
    let replacement_chars = replacement.chars().count();
    let mut len_chars = line.chars().count();
    let mut made = 0;
    let mut from = 0;

    while made < limit {
        let Some(offset) = line[from..].find(pattern) else {
            break;
        };
        let at = from + offset;

        let new_len = len_chars - pattern_chars + replacement_chars;
        if new_len > max_len {
            debug!(
                "Replacement stopped: line would grow to {} characters (max {})",
                new_len, max_len
            );
            break;
        }
        let growth = replacement.len().saturating_sub(pattern.len());
        if line.try_reserve(growth).is_err() {
            warn!("Replacement stopped: could not grow line storage");
            break;
        }

        line.replace_range(at..at + pattern.len(), replacement);
        len_chars = new_len;
        made += 1;

        if !sub.global {
            break;
        }
        from = at + replacement.len();
    }

    if sub.global && made == limit {
        warn!("Replacement limit of {} reached on one line", limit);
    }
    made
}

/// Byte offset of the first occurrence of `needle` in `haystack`, comparing
/// ASCII letters case-insensitively. An empty needle matches at offset 0.
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
