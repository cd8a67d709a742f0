//! Conversion settings
//!
//! Paths are resolved against a base directory laid out as:
//!
//! ```text
//! <base>/tablas/proteina.csv
//! <base>/tablas/sitio_activo.csv
//! <base>/proviz-json/json/<accession>.json
//! ```

use crate::output::JsonStyle;
use pmviz_common::{PmvizError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_DIR: &str = "tablas";
pub const DEFAULT_OUTPUT_DIR: &str = "proviz-json/json";

/// A table file and the column its rows are grouped by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    /// File name inside the data directory
    pub file_name: String,
    /// Column holding the protein identifier
    pub key_field: String,
}

impl TableSource {
    pub fn new(file_name: impl Into<String>, key_field: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            key_field: key_field.into(),
        }
    }

    /// `proteina.csv`, keyed by `id`
    pub fn protein() -> Self {
        Self::new("proteina.csv", "id")
    }

    /// `sitio_activo.csv`, keyed by `proteina_id`
    pub fn active_site() -> Self {
        Self::new("sitio_activo.csv", "proteina_id")
    }
}

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Root of the ProtMiscuity working tree
    pub base_path: PathBuf,

    /// Input directory, relative to `base_path`
    pub data_dir: PathBuf,

    /// Output directory, relative to `base_path`
    pub output_dir: PathBuf,

    pub protein_table: TableSource,

    pub site_table: TableSource,

    #[serde(default)]
    pub json_style: JsonStyle,

    /// Draw a progress bar while writing documents
    #[serde(default)]
    pub show_progress: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            protein_table: TableSource::protein(),
            site_table: TableSource::active_site(),
            json_style: JsonStyle::Compact,
            show_progress: false,
        }
    }
}

impl ConvertConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Load config from environment variables on top of the defaults
    ///
    /// - `PMVIZ_BASE_PATH`
    /// - `PMVIZ_DATA_DIR`
    /// - `PMVIZ_OUTPUT_DIR`
    /// - `PMVIZ_PROTEIN_TABLE`
    /// - `PMVIZ_SITE_TABLE`
    /// - `PMVIZ_JSON_STYLE` (`compact` or `pretty`)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("PMVIZ_BASE_PATH") {
            config.base_path = PathBuf::from(base);
        }

        if let Ok(dir) = std::env::var("PMVIZ_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("PMVIZ_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Ok(name) = std::env::var("PMVIZ_PROTEIN_TABLE") {
            config.protein_table.file_name = name;
        }

        if let Ok(name) = std::env::var("PMVIZ_SITE_TABLE") {
            config.site_table.file_name = name;
        }

        if let Ok(style) = std::env::var("PMVIZ_JSON_STYLE") {
            config.json_style = style
                .parse()
                .map_err(|e: anyhow::Error| PmvizError::config(e.to_string()))?;
        }

        Ok(config)
    }

    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.base_path.join(&self.data_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_path.join(&self.output_dir)
    }

    pub fn protein_table_path(&self) -> PathBuf {
        self.data_path().join(&self.protein_table.file_name)
    }

    pub fn site_table_path(&self) -> PathBuf {
        self.data_path().join(&self.site_table.file_name)
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        for table in [&self.protein_table, &self.site_table] {
            if table.file_name.trim().is_empty() {
                return Err(PmvizError::config("Table file name cannot be empty"));
            }
            if table.key_field.trim().is_empty() {
                return Err(PmvizError::config(format!(
                    "Key field for {} cannot be empty",
                    table.file_name
                )));
            }
        }
        Ok(())
    }
}
