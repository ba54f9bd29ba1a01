use anyhow::{ Context, Result };
use std::fs;
use std::path::Path;

use claimcheck::CheckerConfig;

use crate::cli::ui;

/// Print or write the effective configuration
pub fn execute(config: &CheckerConfig, output: Option<&Path>) -> Result<()> {
    let yaml = config.to_yaml()?;
    match output {
        Some(path) => {
            fs
                ::write(path, yaml)
                .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
            ui::print_success(&format!("Configuration written to {}", path.display()));
        }
        None => print!("{}", yaml),
    }
    Ok(())
}
