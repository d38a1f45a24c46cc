//! Command line parsing.
//!
//! One input line becomes one [`Command`]. The leading letter selects the
//! command (case-insensitive); the remainder carries its arguments.

use std::path::PathBuf;

use crate::core::error::EditError;
use crate::core::range::RangeSpec;
use crate::core::text::Substitution;

/// Editor command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `L [range]`
    List(RangeSpec),
    /// `I [n]`, raw line number as typed
    Insert(Option<usize>),
    /// `D range`
    Delete(RangeSpec),
    /// `E n`, 1-based; the edit prompt shows the line 0-based like
    /// listings do, where EDLIN-style editors prompt with `n` itself
    Edit(usize),
    /// `R [range] /old/new/[g]`
    Replace {
        range: RangeSpec,
        substitution: Substitution,
    },
    /// `S [range] /text/` or `S text`
    Search { range: RangeSpec, needle: String },
    /// `O name`
    Open(PathBuf),
    /// `W [name]`
    Write(Option<PathBuf>),
    /// `P`
    Status,
    /// `H` or `?`
    Help,
    /// `Q`
    Quit,
}

const REPLACE_USAGE: &str = "syntax: R a,b /old/new/[g]";
const SEARCH_USAGE: &str = "syntax: S a,b /text/";

/// Parse one command line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, EditError> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let Some(letter) = chars.next() else {
        return Ok(None);
    };
    let rest = chars.as_str().trim_start();

    let command = match letter.to_ascii_uppercase() {
        'L' => Command::List(RangeSpec::parse(rest)?),
        'I' => Command::Insert((!rest.is_empty()).then(|| leading_number(rest))),
        'D' => {
            if rest.trim().is_empty() {
                return Err(EditError::Usage("need D a[,b]"));
            }
            Command::Delete(RangeSpec::parse(rest)?)
        }
        'E' => {
            if rest.is_empty() {
                return Err(EditError::Usage("need E n"));
            }
            Command::Edit(leading_number(rest))
        }
        'R' => {
            let Some((range, spec)) = split_at_delimiter(rest) else {
                return Err(EditError::Usage(REPLACE_USAGE));
            };
            Command::Replace {
                range: RangeSpec::parse(range)?,
                substitution: parse_substitution(spec)?,
            }
        }
        'S' => parse_search(rest)?,
        'O' => {
            let name = rest.trim_end();
            if name.is_empty() {
                return Err(EditError::Usage("need filename"));
            }
            Command::Open(PathBuf::from(name))
        }
        'W' => {
            let name = rest.trim_end();
            Command::Write((!name.is_empty()).then(|| PathBuf::from(name)))
        }
        'P' => Command::Status,
        'H' | '?' => Command::Help,
        'Q' => Command::Quit,
        other => return Err(EditError::UnknownCommand(other)),
    };

    Ok(Some(command))
}

/// Split `text` into the range before the first `/` and the rest,
/// starting at that `/`.
fn split_at_delimiter(text: &str) -> Option<(&str, &str)> {
    text.find('/').map(|pos| text.split_at(pos))
}

/// Parse `/old/new/[g]`
fn parse_substitution(spec: &str) -> Result<Substitution, EditError> {
    let body = spec.strip_prefix('/').ok_or(EditError::Usage(REPLACE_USAGE))?;
    let (pattern, rest) = body.split_once('/').ok_or(EditError::Usage(REPLACE_USAGE))?;
    let (replacement, flags) = rest.split_once('/').ok_or(EditError::Usage(REPLACE_USAGE))?;
    let global = flags.trim_start().starts_with(['g', 'G']);
    Ok(Substitution::new(pattern, replacement, global))
}

/// `S [range] /text/` searches the range; plain `S text` searches the
/// whole buffer for everything after the letter.
fn parse_search(rest: &str) -> Result<Command, EditError> {
    let Some((range, spec)) = split_at_delimiter(rest) else {
        return Ok(Command::Search {
            range: RangeSpec::ALL,
            needle: rest.to_string(),
        });
    };
    let needle = spec[1..]
        .split_once('/')
        .map(|(needle, _)| needle)
        .ok_or(EditError::Usage(SEARCH_USAGE))?;
    Ok(Command::Search {
        range: RangeSpec::parse(range)?,
        needle: needle.to_string(),
    })
}

/// Leading decimal digits of `text` as a number; 0 when there are none.
fn leading_number(text: &str) -> usize {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(if end == 0 { 0 } else { usize::MAX })
}
