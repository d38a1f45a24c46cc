//! Error taxonomy for the line editor engine.
//!
//! Every failure is recoverable at the command loop: the caller prints a
//! short diagnostic and returns to the prompt.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Range token could not be parsed
    #[error("bad range '{0}'")]
    BadRange(String),

    /// Single-line command referenced a line outside the buffer
    #[error("bad line {index} (buffer has {len} line(s))")]
    BadIndex { index: usize, len: usize },

    /// Store is full; work applied before the overflow is kept
    #[error("out of space ({capacity} lines max)")]
    CapacityExceeded { capacity: usize },

    /// File open/read/write failure
    #[error("{action} failed for '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Line storage could not be reserved
    #[error("alloc failed")]
    AllocFailure,

    /// Missing or malformed command arguments
    #[error("{0}")]
    Usage(&'static str),

    /// Unrecognized leading command letter
    #[error("unknown command '{0}'")]
    UnknownCommand(char),

    /// The command or output stream itself failed
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),
}

impl EditError {
    /// Wrap an I/O error with the file it concerns.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// True when the console itself is broken and the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EditError::Stream(_))
    }
}
