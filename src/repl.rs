//! Interactive command loop: banner, prompt, dispatch, status line.
//!
//! The loop runs over any `BufRead`/`Write` pair, so the same code serves a
//! terminal session and piped scripts.

use std::io::{BufRead, Write};

use log::{debug, error};

use crate::config::Config;
use crate::core::commands::parse_command;
use crate::core::dispatcher::{self, DispatchResult};
use crate::core::error::EditError;
use crate::core::session::Session;

const DEFAULT_PROMPT: &str = "* ";
const RULE: &str = "====================================";

#[derive(Debug, Clone)]
pub struct Repl {
    prompt: String,
    banner: bool,
}

impl Repl {
    pub fn new(prompt: impl Into<String>, banner: bool) -> Self {
        Self {
            prompt: prompt.into(),
            banner,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.get_string("prompt").unwrap_or(DEFAULT_PROMPT),
            config.get_bool("banner").unwrap_or(true),
        )
    }

    pub fn show_banner(&self) -> bool {
        self.banner
    }

    /// Run commands from `input` until `Q` or end of input.
    ///
    /// Command errors are reported and the loop continues; only a failure
    /// of the streams themselves ends it with an error.
    pub fn run<R: BufRead, W: Write>(
        &self,
        session: &mut Session,
        mut input: R,
        mut output: W,
    ) -> Result<(), EditError> {
        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let Some(line) = dispatcher::read_line(&mut input)? else {
                debug!("End of input");
                return Ok(());
            };

            let result = parse_command(&line).and_then(|command| match command {
                Some(command) => {
                    dispatcher::dispatch(session, &command, &mut input, &mut output).map(Some)
                }
                None => Ok(None),
            });

            match result {
                Ok(None) => continue,
                Ok(Some(DispatchResult::Exit)) => return Ok(()),
                Ok(Some(DispatchResult::Success)) => {}
                Err(e) if e.is_fatal() => {
                    error!("Session aborted: {}", e);
                    return Err(e);
                }
                Err(e) => report(&mut output, &e)?,
            }

            dispatcher::write_status(session, &mut output)?;
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT, true)
    }
}

/// Startup banner with the file name upper-cased
pub fn write_banner<W: Write>(output: &mut W, filename: Option<&str>) -> Result<(), EditError> {
    let name = filename.unwrap_or("(none)").to_uppercase();
    writeln!(output, "{}", RULE)?;
    writeln!(output, "lined - Line Editor Version {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(output, "Editing: {}", name)?;
    writeln!(output, "{}", RULE)?;
    Ok(())
}

/// Print a recoverable command error
fn report<W: Write>(output: &mut W, e: &EditError) -> Result<(), EditError> {
    debug!("Command failed: {:?}", e);
    match e {
        EditError::UnknownCommand(_) => writeln!(output, "?")?,
        _ => writeln!(output, "! {}", e)?,
    }
    Ok(())
}
