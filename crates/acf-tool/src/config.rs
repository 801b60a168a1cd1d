//! Command line configuration.
//!
//! # Configuration Sources
//!
//! - CLI arguments (`extract`, `build`, `--verbose`)
//! - Environment variables (`ACFTOOL_VERBOSE`, and `RUST_LOG` for the log
//!   filter)
//!
//! # Example
//!
//! ```no_run
//! use acf_tool::ToolConfig;
//!
//! let config = ToolConfig::from_args();
//! config.validate().expect("Invalid configuration");
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{ToolError, ToolResult};

/// Tool configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "acftool",
    about = "ACF archive utility for Pokémon Ranger: Guardian Signs",
    version
)]
pub struct ToolConfig {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Log every entry, not just summaries
    #[arg(short, long, global = true, env = "ACFTOOL_VERBOSE")]
    pub verbose: bool,
}

/// Tool operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Extract an archive, or every archive in a directory
    #[command(short_flag = 'x', long_flag = "extract")]
    Extract {
        /// `.acf` file or directory of archives
        path: PathBuf,
    },

    /// Build an archive from an extracted directory
    #[command(short_flag = 'b', long_flag = "build")]
    Build {
        /// Directory holding the listing file and entry sources
        directory: PathBuf,

        /// Output archive (defaults to `<DIRECTORY>.acf`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl ToolConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidPath` if:
    /// - The extract path does not exist
    /// - The build input is not a directory
    pub fn validate(&self) -> ToolResult<()> {
        match &self.command {
            Command::Extract { path } => {
                if !path.exists() {
                    return Err(ToolError::InvalidPath {
                        path: path.clone(),
                        reason: "no such file or directory".to_string(),
                    });
                }
            }
            Command::Build { directory, .. } => {
                if !directory.is_dir() {
                    return Err(ToolError::InvalidPath {
                        path: directory.clone(),
                        reason: "not a directory".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let config = ToolConfig::try_parse_from(["acftool", "extract", "a0001.acf"]).unwrap();
        assert!(
            matches!(config.command, Command::Extract { ref path } if path.as_path() == std::path::Path::new("a0001.acf"))
        );
        assert!(!config.verbose);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_parse_short_flags() {
        let config = ToolConfig::try_parse_from(["acftool", "-x", "data"]).unwrap();
        assert!(matches!(config.command, Command::Extract { .. }));

        let config = ToolConfig::try_parse_from(["acftool", "--build", "a0001"]).unwrap();
        assert!(matches!(config.command, Command::Build { output: None, .. }));
    }

    #[test]
    fn test_parse_build_with_output() {
        let config =
            ToolConfig::try_parse_from(["acftool", "build", "a0001", "-o", "out.acf", "--verbose"])
                .unwrap();
        match &config.command {
            Command::Build { directory, output } => {
                assert_eq!(directory, &PathBuf::from("a0001"));
                assert_eq!(output, &Some(PathBuf::from("out.acf")));
            }
            Command::Extract { .. } => panic!("expected build"),
        }
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_missing_command_rejected() {
        assert!(ToolConfig::try_parse_from(["acftool"]).is_err());
    }

    #[test]
    fn test_validate_missing_path() {
        let config = ToolConfig {
            command: Command::Extract {
                path: PathBuf::from("/nonexistent/acftool/input.acf"),
            },
            verbose: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ToolError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_validate_build_requires_directory() {
        let config = ToolConfig {
            command: Command::Build {
                directory: PathBuf::from("Cargo.toml"),
                output: None,
            },
            verbose: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ToolError::InvalidPath { .. })
        ));
    }
}
