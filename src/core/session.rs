//! Editor session: the buffer, its file identity, and the last range a
//! command acted on.
//!
//! Every command runs against a `&mut Session`; there is no global state.

use std::path::{Path, PathBuf};

use log::debug;

use crate::core::buffer::{DEFAULT_CAPACITY, DEFAULT_MAX_LINE_LEN, LineBuffer};
use crate::core::error::EditError;
use crate::core::file;
use crate::core::range::{LineRange, RangeSpec};
use crate::core::text::{self, DEFAULT_REPLACE_LIMIT, Substitution};

/// Engine limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_lines: usize,
    pub max_line_len: usize,
    pub replace_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_CAPACITY,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            replace_limit: DEFAULT_REPLACE_LIMIT,
        }
    }
}

/// A search hit: 1-based line number and byte offset of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub line: usize,
    pub offset: usize,
}

#[derive(Debug)]
pub struct Session {
    buffer: LineBuffer,
    filename: Option<PathBuf>,
    /// (start, end) of the last range acted on; end 0 means unset
    last_range: (usize, usize),
    replace_limit: usize,
}

impl Session {
    pub fn new(limits: Limits) -> Self {
        Self {
            buffer: LineBuffer::with_limits(limits.max_lines, limits.max_line_len),
            filename: None,
            last_range: (1, 0),
            replace_limit: limits.replace_limit,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    /// File the buffer is associated with
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    pub fn last_range(&self) -> (usize, usize) {
        self.last_range
    }

    // ==================== File Operations ====================

    /// Replace the buffer with the content of `path`.
    ///
    /// On success `path` becomes the file identity and the last range
    /// covers the whole buffer. If the file cannot be opened nothing
    /// changes. A load that fails part way (capacity overflow, read error)
    /// keeps the lines read so far and the last range covers them.
    pub fn open(&mut self, path: &Path) -> Result<usize, EditError> {
        let result = file::load_path(&mut self.buffer, path);
        match &result {
            Ok(loaded) => {
                self.filename = Some(path.to_path_buf());
                self.last_range = (1, *loaded);
            }
            Err(EditError::Io { action: "open", .. }) => {}
            Err(_) => self.last_range = (1, self.buffer.len()),
        }
        result
    }

    /// Load the file named at startup. Unlike [`Session::open`], `path`
    /// becomes the file identity even when it cannot be loaded, so a later
    /// `W` creates it.
    pub fn open_or_adopt(&mut self, path: &Path) -> Result<usize, EditError> {
        let result = self.open(path);
        if result.is_err() {
            self.set_filename(path);
        }
        result
    }

    /// Save to `path`, or to the current file when `None`.
    /// Returns the path written.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf, EditError> {
        let target = path
            .or(self.filename.as_deref())
            .map(Path::to_path_buf)
            .ok_or(EditError::Usage("W needs filename (no current file)"))?;
        file::save_path(&self.buffer, &target)?;
        self.filename = Some(target.clone());
        Ok(target)
    }

    // ==================== Line Operations ====================

    /// Resolve `spec` for listing. `None` when the buffer is empty.
    pub fn list(&mut self, spec: RangeSpec) -> Option<LineRange> {
        let range = spec.resolve(self.buffer.len())?;
        self.last_range = (range.start(), range.end());
        Some(range)
    }

    /// Delete the lines in `spec`. Returns the number removed.
    pub fn delete(&mut self, spec: RangeSpec) -> usize {
        let Some(range) = spec.resolve(self.buffer.len()) else {
            return 0;
        };
        let removed = self.buffer.delete_range(range.start(), range.end());
        let len = self.buffer.len();
        let a = range.start();
        self.last_range = (a, a.min(len));
        debug!("Deleted lines {}..={}", range.start(), range.end());
        removed
    }

    /// Insertion point for `I [n]`: `n` when it is a valid position,
    /// otherwise one past the last line.
    pub fn insert_position(&self, at: Option<usize>) -> usize {
        let len = self.buffer.len();
        at.filter(|n| (1..=len + 1).contains(n)).unwrap_or(len + 1)
    }

    /// Insert lines starting at `start`, pulling them from `next_line`
    /// until it yields `None`. `next_line` receives the 1-based position
    /// the next line will occupy; the interactive prompt shows it 0-based
    /// like listings do, where EDLIN-style editors prompt 1-based.
    ///
    /// Lines inserted before an error stay in the buffer. Returns the
    /// number of lines inserted.
    pub fn insert_with<F>(&mut self, start: usize, mut next_line: F) -> Result<usize, EditError>
    where
        F: FnMut(usize) -> Result<Option<String>, EditError>,
    {
        let mut pos = start;
        let result = loop {
            let text = match next_line(pos) {
                Ok(Some(text)) => text,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            };
            if let Err(e) = self.buffer.insert_at(pos, &text) {
                break Err(e);
            }
            pos += 1;
        };

        self.last_range = (start, pos.saturating_sub(1));
        result.map(|()| pos - start)
    }

    /// Replace the content of line `idx`
    pub fn edit_line(&mut self, idx: usize, text: &str) -> Result<(), EditError> {
        self.buffer.replace_line(idx, text)?;
        self.last_range = (idx, idx);
        Ok(())
    }

    /// Apply `sub` to every line in `spec`. Returns the total number of
    /// replacements.
    pub fn replace(&mut self, spec: RangeSpec, sub: &Substitution) -> usize {
        let Some(range) = spec.resolve(self.buffer.len()) else {
            return 0;
        };
        let total: usize = range
            .lines()
            .map(|idx| self.buffer.substitute(idx, sub, self.replace_limit))
            .sum();
        self.last_range = (range.start(), range.end());
        total
    }

    /// Case-insensitive search over `spec`, hits in ascending line order
    pub fn search(&mut self, spec: RangeSpec, needle: &str) -> Vec<SearchHit> {
        let Some(range) = spec.resolve(self.buffer.len()) else {
            return Vec::new();
        };
        let hits: Vec<SearchHit> = range
            .lines()
            .filter_map(|line| {
                let text = self.buffer.get(line)?;
                text::find_ignore_ascii_case(text, needle).map(|offset| SearchHit { line, offset })
            })
            .collect();
        self.last_range = (range.start(), range.end());
        hits
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_of(lines: &[&str]) -> Session {
        let mut session = Session::default();
        for line in lines {
            session.buffer_mut().push(line).unwrap();
        }
        session
    }

    fn feed(lines: &[&str]) -> impl FnMut(usize) -> Result<Option<String>, EditError> {
        let mut iter = lines
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter();
        move |_| Ok(iter.next())
    }

    #[test]
    fn test_delete_updates_last_range() {
        let mut session = session_of(&["one", "two", "three"]);
        assert_eq!(session.delete(RangeSpec::parse("2,2").unwrap()), 1);
        assert_eq!(session.buffer().to_vec(), vec!["one", "three"]);
        assert_eq!(session.last_range(), (2, 2));
    }

    #[test]
    fn test_delete_tail_clamps_last_range() {
        let mut session = session_of(&["one", "two", "three"]);
        session.delete(RangeSpec::parse("3").unwrap());
        assert_eq!(session.last_range(), (3, 2));
    }

    #[test]
    fn test_delete_on_empty_buffer() {
        let mut session = Session::default();
        assert_eq!(session.delete(RangeSpec::ALL), 0);
        assert_eq!(session.last_range(), (1, 0));
    }

    #[test]
    fn test_list_on_empty_buffer() {
        let mut session = Session::default();
        assert_eq!(session.list(RangeSpec::ALL), None);
    }

    #[test]
    fn test_insert_position() {
        let session = session_of(&["a", "b"]);
        assert_eq!(session.insert_position(None), 3);
        assert_eq!(session.insert_position(Some(1)), 1);
        assert_eq!(session.insert_position(Some(3)), 3);
        assert_eq!(session.insert_position(Some(0)), 3);
        assert_eq!(session.insert_position(Some(42)), 3);
    }

    #[test]
    fn test_insert_with() {
        let mut session = session_of(&["a", "b"]);
        let inserted = session.insert_with(2, feed(&["x", "y"])).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(session.buffer().to_vec(), vec!["a", "x", "y", "b"]);
        assert_eq!(session.last_range(), (2, 3));
    }

    #[test]
    fn test_insert_stops_at_capacity() {
        let mut session = Session::new(Limits {
            max_lines: 3,
            ..Limits::default()
        });
        session.buffer_mut().push("a").unwrap();

        let result = session.insert_with(2, feed(&["x", "y", "z", "w"]));
        assert!(matches!(
            result,
            Err(EditError::CapacityExceeded { capacity: 3 })
        ));
        assert_eq!(session.buffer().to_vec(), vec!["a", "x", "y"]);
        assert_eq!(session.last_range(), (2, 3));
    }

    #[test]
    fn test_edit_line() {
        let mut session = session_of(&["a", "b"]);
        session.edit_line(2, "B").unwrap();
        assert_eq!(session.buffer().to_vec(), vec!["a", "B"]);
        assert_eq!(session.last_range(), (2, 2));

        assert!(session.edit_line(3, "C").is_err());
        assert_eq!(session.last_range(), (2, 2));
    }

    #[test]
    fn test_replace_over_range() {
        let mut session = session_of(&["foo foo", "bar", "foo"]);
        let sub = Substitution::new("foo", "baz", true);
        assert_eq!(session.replace(RangeSpec::ALL, &sub), 3);
        assert_eq!(session.buffer().to_vec(), vec!["baz baz", "bar", "baz"]);
        assert_eq!(session.last_range(), (1, 3));
    }

    #[test]
    fn test_replace_respects_limit() {
        let mut session = Session::new(Limits {
            replace_limit: 2,
            ..Limits::default()
        });
        session.buffer_mut().push("aaaa").unwrap();
        let sub = Substitution::new("a", "b", true);
        assert_eq!(session.replace(RangeSpec::ALL, &sub), 2);
        assert_eq!(session.buffer().get(1), Some("bbaa"));
    }

    #[test]
    fn test_search() {
        let mut session = session_of(&["Hello World", "nothing", "world peace"]);
        let hits = session.search(RangeSpec::ALL, "WORLD");
        assert_eq!(
            hits,
            vec![
                SearchHit { line: 1, offset: 6 },
                SearchHit { line: 3, offset: 0 }
            ]
        );
        assert_eq!(session.last_range(), (1, 3));

        let hits = session.search(RangeSpec::parse("2,3").unwrap(), "world");
        assert_eq!(hits, vec![SearchHit { line: 3, offset: 0 }]);
    }

    #[test]
    fn test_save_without_name() {
        let mut session = session_of(&["a"]);
        assert!(matches!(session.save(None), Err(EditError::Usage(_))));
        assert_eq!(session.filename(), None);
    }

    #[test]
    fn test_open_sets_identity_and_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let mut session = Session::default();
        assert_eq!(session.open(&path).unwrap(), 2);
        assert_eq!(session.filename(), Some(path.as_path()));
        assert_eq!(session.last_range(), (1, 2));
    }

    #[test]
    fn test_open_failure_keeps_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_of(&["keep"]);
        session.set_filename("current.txt");

        assert!(session.open(&dir.path().join("missing.txt")).is_err());
        assert_eq!(session.filename(), Some(Path::new("current.txt")));
        assert_eq!(session.buffer().to_vec(), vec!["keep"]);
    }

    #[test]
    fn test_partial_open_covers_loaded_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.txt");
        std::fs::write(&path, "a\nb\nc\nd\n").unwrap();

        let mut session = Session::new(Limits {
            max_lines: 2,
            ..Limits::default()
        });
        session.buffer_mut().push("x").unwrap();
        session.edit_line(1, "y").unwrap();
        session.set_filename("mine.txt");
        assert_eq!(session.last_range(), (1, 1));

        assert!(matches!(
            session.open(&path),
            Err(EditError::CapacityExceeded { capacity: 2 })
        ));
        assert_eq!(session.buffer().to_vec(), vec!["a", "b"]);
        assert_eq!(session.last_range(), (1, 2));
        assert_eq!(session.filename(), Some(Path::new("mine.txt")));
    }

    #[test]
    fn test_open_or_adopt_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");

        let mut session = Session::default();
        assert!(matches!(
            session.open_or_adopt(&path),
            Err(EditError::Io { action: "open", .. })
        ));
        assert!(session.buffer().is_empty());
        assert_eq!(session.filename(), Some(path.as_path()));
        assert_eq!(session.last_range(), (1, 0));
    }

    #[test]
    fn test_open_or_adopt_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();

        let mut session = Session::default();
        assert_eq!(session.open_or_adopt(&path).unwrap(), 3);
        assert_eq!(session.buffer().to_vec(), vec!["one", "two", "three"]);
        assert_eq!(session.filename(), Some(path.as_path()));
        assert_eq!(session.last_range(), (1, 3));
    }
}
