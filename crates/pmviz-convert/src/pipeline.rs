//! End-to-end conversion run
//!
//! 1. Ensure the data and output directories exist
//! 2. Parse the protein and active site tables
//! 3. Join them into one record per protein
//! 4. Assemble and write one document per protein with tracks

use crate::config::ConvertConfig;
use crate::document::assemble;
use crate::merge::join;
use crate::output::{ensure_directory, write_document};
use crate::table::SdtParser;
use indicatif::{ProgressBar, ProgressStyle};
use pmviz_common::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Outcome of a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Proteins in the joined index
    pub proteins: usize,
    /// Documents written to the output directory
    pub documents_written: usize,
    /// Proteins without any determined site position
    pub without_sites: usize,
    /// Proteins with tracks but no accession code to name the file
    pub missing_accession: usize,
    /// Paths of the written documents, in index order
    pub written: Vec<PathBuf>,
}

/// Run the full conversion described by `config`
///
/// Stops at the first protein whose position list cannot be parsed. Files
/// written before that point are kept.
#[instrument(skip_all, fields(base = %config.base_path.display()))]
pub fn run(config: &ConvertConfig) -> Result<ConversionSummary> {
    config.validate()?;

    let data_path = config.data_path();
    let output_path = config.output_path();
    ensure_directory(&data_path)?;
    ensure_directory(&output_path)?;

    let parser = SdtParser::new();
    let proteins = parser.parse_file(config.protein_table_path(), &config.protein_table.key_field)?;
    let sites = parser.parse_file(config.site_table_path(), &config.site_table.key_field)?;
    info!(
        proteins = proteins.len(),
        site_rows = sites.record_count(),
        "Parsed ProtMiscuity tables"
    );

    let index = join(&proteins, &sites)?;

    let mut summary = ConversionSummary {
        proteins: index.len(),
        ..ConversionSummary::default()
    };

    let progress = progress_bar(config.show_progress, index.len() as u64);

    for (protein_id, record) in &index {
        progress.inc(1);

        let Some(document) = assemble(protein_id, record)? else {
            summary.without_sites += 1;
            continue;
        };

        if document.accession.is_empty() {
            warn!(protein_id = %protein_id, "Protein has sites but no accession code, not written");
            summary.missing_accession += 1;
            continue;
        }

        let path = write_document(&output_path, &document, config.json_style)?;
        summary.written.push(path);
        summary.documents_written += 1;
    }

    progress.finish_and_clear();

    info!(
        proteins = summary.proteins,
        written = summary.documents_written,
        without_sites = summary.without_sites,
        missing_accession = summary.missing_accession,
        output = %output_path.display(),
        "Conversion complete"
    );
    Ok(summary)
}

fn progress_bar(visible: bool, total: u64) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} proteins")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pmviz_common::PmvizError;
    use std::fs;
    use std::path::Path;

    fn write_tables(base: &Path, proteins: &str, sites: &str) {
        let data = base.join("tablas");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("proteina.csv"), proteins).unwrap();
        fs::write(data.join("sitio_activo.csv"), sites).unwrap();
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_writes_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(
            dir.path(),
            "id;secuencia;codigo_uni_prot\nP1;ABCDEFGHIJ;U1\nP2;MKV;U2\n",
            "proteina_id;can_act_site;prom_act_site\nP1;1,2,4;\nP2;ND;\n",
        );

        let summary = run(&ConvertConfig::new(dir.path())).unwrap();

        assert_eq!(summary.proteins, 2);
        assert_eq!(summary.documents_written, 1);
        assert_eq!(summary.without_sites, 1);

        let out = dir.path().join("proviz-json/json");
        assert_eq!(summary.written, vec![out.join("U1.json")]);
        assert!(!out.join("U2.json").exists());

        let value = read_json(&out.join("U1.json"));
        let tracks = value.as_array().unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0]["name"], "canonic site");
        assert_eq!(tracks[0]["data"][0]["sequence"], "AB");
        assert_eq!(tracks[0]["data"][1]["start"], "4");
        assert_eq!(tracks[0]["data"][1]["end"], "4");
        assert_eq!(tracks[0]["data"][1]["sequence"], "D");
    }

    #[test]
    fn test_missing_accession_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(
            dir.path(),
            "id;secuencia;codigo_uni_prot\n",
            "proteina_id;can_act_site;prom_act_site\n9;3;\n",
        );

        let summary = run(&ConvertConfig::new(dir.path())).unwrap();
        assert_eq!(summary.missing_accession, 1);
        assert_eq!(summary.documents_written, 0);
        assert!(!dir.path().join("proviz-json/json/.json").exists());
    }

    #[test]
    fn test_bad_position_aborts_run_keeping_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(
            dir.path(),
            "id;secuencia;codigo_uni_prot\n1;MKV;A1\n2;MKV;A2\n",
            "proteina_id;can_act_site;prom_act_site\n1;1;\n2;1,x;\n",
        );

        let err = run(&ConvertConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, PmvizError::Protein { ref protein_id, .. } if protein_id == "2"));
        assert!(dir.path().join("proviz-json/json/A1.json").exists());
    }

    #[test]
    fn test_missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = run(&ConvertConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, PmvizError::Io(_)));
        // Directories are still prepared before reading
        assert!(dir.path().join("tablas").is_dir());
        assert!(dir.path().join("proviz-json/json").is_dir());
    }

    #[test]
    fn test_swapped_tables_are_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(
            dir.path(),
            "id;can_act_site;prom_act_site\n1;1;\n",
            "proteina_id;secuencia;codigo_uni_prot\n1;MKV;A1\n",
        );

        let err = run(&ConvertConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, PmvizError::Schema { .. }));
    }
}
