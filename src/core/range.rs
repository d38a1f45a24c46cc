//! Line range parsing and resolution.
//!
//! A [`RangeSpec`] is what the user typed; a [`LineRange`] is that spec
//! clamped against the current buffer size. Resolution is separate from
//! parsing because the buffer size can change between the two (e.g. the
//! same spec reused after a delete).

use std::ops::RangeInclusive;

use crate::core::error::EditError;

/// Unresolved range as typed. `None` bounds take their default at
/// resolution time: 1 for the start, the last line for the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSpec {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Resolved range, 1-based inclusive, always within `1..=len` of the
/// buffer it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl RangeSpec {
    /// The whole buffer
    pub const ALL: RangeSpec = RangeSpec {
        start: None,
        end: None,
    };

    /// Parse a range token.
    ///
    /// Accepted forms (whitespace around the comma is ignored):
    /// - empty: the whole buffer
    /// - `X`: line X alone
    /// - `X,Y`, `X,`: lines X through Y, or X through the end
    /// - `,Y`: line 1 through Y
    ///
    /// Zero in either position means the default for that position.
    pub fn parse(token: &str) -> Result<Self, EditError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Self::ALL);
        }

        match token.split_once(',') {
            None => {
                let line = parse_bound(token, token)?;
                Ok(Self {
                    start: line,
                    end: line,
                })
            }
            Some((first, second)) => {
                let (first, second) = (first.trim(), second.trim());
                let start = if first.is_empty() {
                    None
                } else {
                    parse_bound(first, token)?
                };
                let end = if second.is_empty() {
                    None
                } else {
                    parse_bound(second, token)?
                };
                Ok(Self { start, end })
            }
        }
    }

    /// Clamp against a buffer of `len` lines. Reversed bounds are swapped.
    /// Returns `None` for an empty buffer, where every range is a no-op.
    pub fn resolve(self, len: usize) -> Option<LineRange> {
        if len == 0 {
            return None;
        }
        let a = self.start.unwrap_or(1);
        let b = self.end.map_or(len, |end| end.min(len));
        let (a, b) = if a > b { (b, a) } else { (a, b) };
        Some(LineRange {
            start: a.clamp(1, len),
            end: b.clamp(1, len),
        })
    }
}

/// Digits only; overflow saturates, zero means "default".
fn parse_bound(digits: &str, token: &str) -> Result<Option<usize>, EditError> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EditError::BadRange(token.to_string()));
    }
    let n = digits.parse::<usize>().unwrap_or(usize::MAX);
    Ok((n > 0).then_some(n))
}

impl LineRange {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of lines covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// 1-based line numbers in ascending order
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(token: &str, len: usize) -> Option<(usize, usize)> {
        RangeSpec::parse(token)
            .unwrap()
            .resolve(len)
            .map(|r| (r.start(), r.end()))
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(RangeSpec::parse("").unwrap(), RangeSpec::ALL);
        assert_eq!(RangeSpec::parse("   ").unwrap(), RangeSpec::ALL);
        assert_eq!(
            RangeSpec::parse("4").unwrap(),
            RangeSpec {
                start: Some(4),
                end: Some(4)
            }
        );
        assert_eq!(
            RangeSpec::parse("2,7").unwrap(),
            RangeSpec {
                start: Some(2),
                end: Some(7)
            }
        );
        assert_eq!(
            RangeSpec::parse(" 2 , 7 ").unwrap(),
            RangeSpec {
                start: Some(2),
                end: Some(7)
            }
        );
        assert_eq!(
            RangeSpec::parse("3,").unwrap(),
            RangeSpec {
                start: Some(3),
                end: None
            }
        );
        assert_eq!(
            RangeSpec::parse(",5").unwrap(),
            RangeSpec {
                start: None,
                end: Some(5)
            }
        );
        assert_eq!(RangeSpec::parse(",").unwrap(), RangeSpec::ALL);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for token in ["abc", "1-3", "-1", "1,b", "1,2,3", "+4", "1 2"] {
            assert!(
                matches!(RangeSpec::parse(token), Err(EditError::BadRange(_))),
                "{:?} should not parse",
                token
            );
        }
    }

    #[test]
    fn test_zero_means_default() {
        assert_eq!(resolve("0", 5), Some((1, 5)));
        assert_eq!(resolve("0,2", 5), Some((1, 2)));
        assert_eq!(resolve("2,0", 5), Some((2, 5)));
    }

    #[test]
    fn test_resolve_defaults() {
        assert_eq!(resolve("", 3), Some((1, 3)));
        assert_eq!(resolve(",2", 3), Some((1, 2)));
        assert_eq!(resolve("2,", 3), Some((2, 3)));
        assert_eq!(resolve("2", 3), Some((2, 2)));
    }

    #[test]
    fn test_resolve_clamps_and_swaps() {
        assert_eq!(resolve("2,99", 3), Some((2, 3)));
        assert_eq!(resolve("3,1", 3), Some((1, 3)));
        assert_eq!(resolve("10", 3), Some((3, 3)));
        assert_eq!(resolve("7,9", 3), Some((3, 3)));
        assert_eq!(resolve("99999999999999999999999", 3), Some((3, 3)));
    }

    #[test]
    fn test_resolve_empty_buffer() {
        assert_eq!(resolve("", 0), None);
        assert_eq!(resolve("1,5", 0), None);
    }

    #[test]
    fn test_resolved_bounds_always_valid() {
        let tokens = ["", "0", "1", "5", "12", ",3", "4,", "9,2", "0,0", "6,6", "100,1"];
        for len in 1..=8 {
            for token in tokens {
                let range = RangeSpec::parse(token).unwrap().resolve(len).unwrap();
                assert!(
                    1 <= range.start() && range.start() <= range.end() && range.end() <= len,
                    "{:?} against {} lines resolved to {:?}",
                    token,
                    len,
                    range
                );
                assert_eq!(range.lines().count(), range.len());
            }
        }
    }
}
