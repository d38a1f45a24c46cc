pub mod config;
pub mod core;
pub mod repl;
pub mod user_config;
