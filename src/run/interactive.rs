//! Interactive (prompt loop) mode implementation.

use std::io::{self, Write};

use log::warn;

use lined::config::Config;
use lined::core::session::Session;
use lined::repl::{Repl, write_banner};

use crate::cli::Cli;

/// Run the editor on stdin/stdout.
pub fn run_interactive(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config.limits());
    let repl = Repl::from_config(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();

    if let Some(path) = &cli.file {
        if let Err(e) = session.open_or_adopt(path) {
            warn!("Startup load of {} failed: {}", path.display(), e);
            writeln!(
                stdout_lock,
                "! couldn't load '{}': {}",
                path.display(),
                e
            )?;
        }
    }

    if repl.show_banner() {
        let name = cli.file.as_ref().map(|p| p.display().to_string());
        write_banner(&mut stdout_lock, name.as_deref())?;
    }
    lined::core::dispatcher::write_status(&session, &mut stdout_lock)?;

    repl.run(&mut session, stdin.lock(), stdout_lock)?;
    Ok(())
}
