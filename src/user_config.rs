// lined Configuration
// Edit this file to customize your editor, then rebuild.

use crate::config::Config;
use crate::core::buffer::{DEFAULT_CAPACITY, DEFAULT_MAX_LINE_LEN};
use crate::core::text::DEFAULT_REPLACE_LIMIT;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Buffer limits
    config.set("max-lines", DEFAULT_CAPACITY as i64);
    config.set("max-line-length", DEFAULT_MAX_LINE_LEN as i64);

    // Per-line bound for R /old/new/g
    config.set("replace-limit", DEFAULT_REPLACE_LIMIT as i64);

    // Interface
    config.set("prompt", "* ");
    config.set("banner", true);
}
