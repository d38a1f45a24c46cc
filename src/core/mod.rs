//! This module constitutes the core, headless line-editing engine of lined.
//! It manages the bounded line buffer, range resolution, per-line text
//! mutation, file loading and saving, and command parsing and dispatch.

pub mod buffer;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod file;
pub mod range;
pub mod session;
pub mod text;
