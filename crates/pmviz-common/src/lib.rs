//! pmviz common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the pmviz workspace members.
//!
//! - **Error Handling**: [`PmvizError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use pmviz_common::logging::{init_logging, LogConfig};
//! use pmviz_common::{PmvizError, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     Ok(std::fs::read_to_string(path)?)
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     let content = load("tablas/proteina.csv")?;
//!     tracing::info!(bytes = content.len(), "Loaded table");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{PmvizError, Result};
