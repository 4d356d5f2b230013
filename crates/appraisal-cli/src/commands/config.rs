//! Config command implementation.

use crate::config::AppConfig;
use crate::error::Result;

/// Print the effective configuration as TOML.
pub fn execute_config(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
