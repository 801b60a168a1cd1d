//! ACF archive command line tool.
//!
//! Extracts ACF archives into editable directories and packs such
//! directories back into archives.
//!
//! # Architecture
//!
//! - `config`: Command line parsing and validation
//! - `extract`: Archive to directory, with the listing file
//! - `build`: Directory to archive, sources loaded from disk
//! - `extension`: File extensions from Nitro resource tags
//!
//! # Example
//!
//! ```no_run
//! use acf_tool::{ToolConfig, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = ToolConfig::from_args();
//!     config.validate()?;
//!     run(&config)?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod build;
pub mod config;
pub mod error;
pub mod extension;
pub mod extract;

pub use build::{BuildSummary, DirectoryLoader, build_directory, default_output_path};
pub use config::{Command, ToolConfig};
pub use error::{ToolError, ToolResult};
pub use extension::detect_extension;
pub use extract::{BatchSummary, ExtractSummary, extract_archive, extract_path};

/// Name of the listing file inside an extracted directory
pub const LISTING_FILE: &str = "filelist.txt";

/// Run the configured command
pub fn run(config: &ToolConfig) -> ToolResult<()> {
    match &config.command {
        Command::Extract { path } => {
            let batch = extract_path(path)?;
            if batch.failed > 0 {
                tracing::warn!("{} archive(s) could not be extracted", batch.failed);
            }
        }
        Command::Build { directory, output } => {
            build_directory(directory, output.as_deref())?;
        }
    }
    Ok(())
}
