//! pmviz convert library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns ProtMiscuity active site tables into ProViz JSON tracks.
//!
//! # Overview
//!
//! - **Tables**: semicolon-delimited rows grouped by protein ([`table`])
//! - **Join**: one record per protein from both tables ([`merge`])
//! - **Ranges**: residue positions collapsed into contiguous runs ([`ranges`])
//! - **Tracks**: canonical and promiscuous site tracks ([`site`], [`document`])
//! - **Output**: one `<accession>.json` per protein ([`output`], [`pipeline`])
//!
//! # Example
//!
//! ```no_run
//! use pmviz_convert::config::ConvertConfig;
//! use pmviz_convert::pipeline;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConvertConfig::new("/srv/ProtMiscuity");
//!     let summary = pipeline::run(&config)?;
//!     println!("{} documents written", summary.documents_written);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod merge;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod ranges;
pub mod site;
pub mod table;

// Re-export commonly used types
pub use config::ConvertConfig;
pub use models::{ProteinDocument, ProteinRecord, SiteKind, TableKind};
pub use pipeline::ConversionSummary;

use clap::Parser;
use output::JsonStyle;
use std::path::PathBuf;

/// pmviz - ProtMiscuity to ProViz track converter
#[derive(Parser, Debug)]
#[command(name = "pmviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory holding the tables and receiving the JSON files
    #[arg(short, long, env = "PMVIZ_BASE_PATH")]
    pub base_path: Option<PathBuf>,

    /// Input directory, relative to the base path
    #[arg(long, env = "PMVIZ_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output directory, relative to the base path
    #[arg(short, long, env = "PMVIZ_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write indented JSON instead of single-line files
    #[arg(long)]
    pub pretty: bool,

    /// Show a progress bar while writing
    #[arg(long)]
    pub progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, mut config: ConvertConfig) -> ConvertConfig {
        if let Some(ref base) = self.base_path {
            config = config.with_base_path(base);
        }
        if let Some(ref dir) = self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(ref dir) = self.output_dir {
            config = config.with_output_dir(dir);
        }
        if self.pretty {
            config = config.with_json_style(JsonStyle::Pretty);
        }
        config.with_progress(self.progress)
    }
}
