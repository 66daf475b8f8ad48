//! CLI command implementations for jsvars.
//!
//! Each module corresponds to a subcommand (`jsvars <command>`).

pub mod generate;
pub mod render;

use std::path::Path;

use anyhow::Result;
use jsvars_core::config::Config;
use tracing::debug;

/// Load the config file, or the defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        debug!(path = %path.display(), "no config file, using defaults");
        Ok(Config::default())
    }
}
