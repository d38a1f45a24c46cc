//! Application execution for lined.
//!
//! Wires the process streams, the startup file and the configured limits
//! into an interactive session.

mod interactive;

pub use interactive::run_interactive;
