//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod inspect;
pub mod transform;

/// Common CLI utilities
pub mod utils {
    use crate::config::DefineConfig;
    use crate::error::Result;
    use std::path::Path;

    /// Build the configuration from an optional JSON file plus `-D` overrides
    pub fn load_config(config_path: Option<&Path>, defines: &[String]) -> Result<DefineConfig> {
        let mut config = match config_path {
            Some(path) => DefineConfig::from_file(path)?,
            None => DefineConfig::default(),
        };
        config.apply_defines(defines)?;

        if config.is_empty() {
            log::warn!("No replacements configured; output will match input");
        }
        Ok(config)
    }

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&Path>) -> Result<()> {
        match output_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, content)?;
                Ok(())
            }
            None => {
                print!("{}", content);
                Ok(())
            }
        }
    }
}
