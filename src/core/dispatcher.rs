//! Command dispatcher: runs one parsed [`Command`] against a [`Session`],
//! reading continuation input (insert and edit) from `input` and writing
//! results to `output`.

use std::io::{BufRead, Write};

use log::debug;

use crate::core::commands::Command;
use crate::core::error::EditError;
use crate::core::session::Session;

/// Result of command dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// Command finished; the loop prints the status line and prompts again
    Success,
    /// Exit requested
    Exit,
}

/// Terminator line for insert mode
const END_OF_INSERT: &str = ".";

const HELP: &[&str] = &[
    "Commands:",
    "  L [a][,b]             list lines",
    "  I [n]                 insert at n (end with a single '.')",
    "  D a[,b]               delete lines",
    "  E n                   edit (replace) line",
    "  R [a][,b] /old/new/[g]  replace; 'g' = global per line",
    "  S [a][,b] /text/      search (case-insensitive)",
    "  O name                open (load) file",
    "  W [name]              write (save) file",
    "  P                     print status",
    "  H or ?                help",
    "  Q                     quit",
];

/// Execute `command` against `session`.
pub fn dispatch<R: BufRead, W: Write>(
    session: &mut Session,
    command: &Command,
    input: &mut R,
    output: &mut W,
) -> Result<DispatchResult, EditError> {
    debug!("Dispatching {:?}", command);

    match command {
        Command::List(spec) => match session.list(*spec) {
            Some(range) => {
                for idx in range.lines() {
                    if let Some(line) = session.buffer().get(idx) {
                        write_line(output, idx, line)?;
                    }
                }
            }
            None => writeln!(output, "(empty)")?,
        },

        Command::Insert(at) => {
            let start = session.insert_position(*at);
            writeln!(
                output,
                "-- Insert mode at line {:05} (end with a single '.') --",
                start - 1
            )?;
            session.insert_with(start, |pos| {
                write!(output, "{:05}: ", pos - 1)?;
                output.flush()?;
                match read_line(input)? {
                    Some(text) if text != END_OF_INSERT => Ok(Some(text)),
                    _ => Ok(None),
                }
            })?;
        }

        Command::Delete(spec) => {
            session.delete(*spec);
        }

        Command::Edit(idx) => {
            let idx = *idx;
            let Some(current) = session.buffer().get(idx) else {
                return Err(EditError::BadIndex {
                    index: idx,
                    len: session.buffer().len(),
                });
            };
            write_line(output, idx, current)?;
            write!(output, "{:05}: ", idx - 1)?;
            output.flush()?;
            if let Some(text) = read_line(input)? {
                session.edit_line(idx, &text)?;
            }
        }

        Command::Replace {
            range,
            substitution,
        } => {
            let total = session.replace(*range, substitution);
            writeln!(output, "Replaced {} occurrence(s).", total)?;
        }

        Command::Search { range, needle } => {
            let hits = session.search(*range, needle);
            for hit in &hits {
                if let Some(line) = session.buffer().get(hit.line) {
                    write_line(output, hit.line, line)?;
                }
            }
            writeln!(output, "-- {} match(es)", hits.len())?;
        }

        Command::Open(path) => {
            let loaded = session.open(path)?;
            writeln!(output, "-- loaded {} line(s)", loaded)?;
        }

        Command::Write(path) => {
            let written = session.save(path.as_deref())?;
            writeln!(
                output,
                "-- wrote {} line(s) to {}",
                session.buffer().len(),
                written.display()
            )?;
        }

        Command::Status => write_status(session, output)?,

        Command::Help => {
            for line in HELP {
                writeln!(output, "{}", line)?;
            }
        }

        Command::Quit => return Ok(DispatchResult::Exit),
    }

    Ok(DispatchResult::Success)
}

/// `Lines: N  File: NAME`
pub fn write_status<W: Write>(session: &Session, output: &mut W) -> Result<(), EditError> {
    match session.filename() {
        Some(path) => writeln!(
            output,
            "Lines: {}  File: {}",
            session.buffer().len(),
            path.display()
        )?,
        None => writeln!(output, "Lines: {}  File: (none)", session.buffer().len())?,
    }
    Ok(())
}

/// One listed line, prefixed with its 0-based display index
fn write_line<W: Write>(output: &mut W, idx: usize, text: &str) -> Result<(), EditError> {
    writeln!(output, "{:05}: {}", idx - 1, text)?;
    Ok(())
}

/// Next input line without its terminator; `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, EditError> {
    let mut raw = Vec::new();
    if input.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    let text = String::from_utf8_lossy(&raw);
    let text: &str = &text;
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    Ok(Some(text.to_string()))
}
