//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    explicit_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let effective = config::load(explicit_path)?;
            println!("{}", config::redacted_toml(&effective)?);
        }
        ConfigAction::Init { force } => {
            let path = match explicit_path {
                Some(path) => path.to_path_buf(),
                None => config::default_path()?,
            };
            config::init(&path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote {}", path.display()))
            );
        }
    }
    Ok(())
}
