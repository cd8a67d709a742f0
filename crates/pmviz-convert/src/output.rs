//! Output directory handling and JSON document writing

use crate::models::ProteinDocument;
use pmviz_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Layout of the written JSON files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStyle {
    /// Single line, `", "` between items and `": "` after keys
    #[default]
    Compact,
    /// Indented, one value per line
    Pretty,
}

impl std::str::FromStr for JsonStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(JsonStyle::Compact),
            "pretty" => Ok(JsonStyle::Pretty),
            _ => Err(anyhow::anyhow!("Invalid JSON style: {}", s)),
        }
    }
}

/// Single-line formatter that keeps a space after `,` and `:`
///
/// This is the layout ProViz track files have always been published in.
#[derive(Debug, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Create `path` and any missing parents
pub fn ensure_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
        info!(path = %path.display(), "Created directory");
    }
    Ok(())
}

/// Serialize a document into `writer`
pub fn write_json<W: Write>(writer: W, document: &ProteinDocument, style: JsonStyle) -> Result<()> {
    match style {
        JsonStyle::Compact => {
            let mut serializer = Serializer::with_formatter(writer, SpacedFormatter);
            document.serialize(&mut serializer)?;
        },
        JsonStyle::Pretty => {
            let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::new());
            document.serialize(&mut serializer)?;
        },
    }
    Ok(())
}

/// Write `<accession>.json` into `dir`, replacing any previous file
pub fn write_document(dir: impl AsRef<Path>, document: &ProteinDocument, style: JsonStyle) -> Result<PathBuf> {
    let path = dir.as_ref().join(document.file_name());

    let mut writer = BufWriter::new(File::create(&path)?);
    write_json(&mut writer, document, style)?;
    writer.flush()?;

    debug!(
        protein_id = %document.protein_id,
        path = %path.display(),
        tracks = document.sites.len(),
        "Wrote document"
    );
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{ProteinRecord, SiteKind};
    use crate::document::assemble;

    fn document() -> ProteinDocument {
        let record = ProteinRecord {
            sequence: "ABCDEFGHIJ".to_string(),
            accession: "U1".to_string(),
            canonical_sites: "4".to_string(),
            promiscuous_sites: String::new(),
        };
        assemble("P1", &record).unwrap().unwrap()
    }

    #[test]
    fn test_compact_layout() {
        let mut buf = Vec::new();
        write_json(&mut buf, &document(), JsonStyle::Compact).unwrap();

        let expected = concat!(
            r##"[{"type": "peptides", "position": "-1", "name": "canonic site", "##,
            r##""colour": "#0087ff", "help": "Canonic site residues annotated in ProtMiscuity", "##,
            r##""text_colour": "#000", "data": [{"start": "4", "end": "4", "sequence": "D", "##,
            r##""colour": "#0087ff", "hover": "canonic site"}]}]"##,
        );
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn test_pretty_layout_parses_back() {
        let mut buf = Vec::new();
        write_json(&mut buf, &document(), JsonStyle::Pretty).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], SiteKind::Canonical.label());
        assert_eq!(value[0]["data"][0]["sequence"], "D");
    }

    #[test]
    fn test_write_document_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path(), &document(), JsonStyle::Compact).unwrap();

        assert_eq!(path, dir.path().join("U1.json"));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_ensure_directory_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("proviz-json").join("json");

        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());

        // Existing directories are left alone
        ensure_directory(&nested).unwrap();
    }

    #[test]
    fn test_json_style_from_str() {
        assert_eq!("Pretty".parse::<JsonStyle>().unwrap(), JsonStyle::Pretty);
        assert_eq!("compact".parse::<JsonStyle>().unwrap(), JsonStyle::Compact);
        assert!("yaml".parse::<JsonStyle>().is_err());
    }
}
