//! Data models for ProtMiscuity tables and ProViz tracks

use crate::table::Record;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Table field names
// ============================================================================

/// Amino acid sequence column of the protein table
pub const SEQUENCE_FIELD: &str = "secuencia";
/// UniProt accession column of the protein table
pub const ACCESSION_FIELD: &str = "codigo_uni_prot";
/// Canonical active site positions column of the active site table
pub const CANONICAL_SITE_FIELD: &str = "can_act_site";
/// Promiscuous active site positions column of the active site table
pub const PROMISCUOUS_SITE_FIELD: &str = "prom_act_site";

/// Colour of every residue range in a track
pub const RANGE_COLOUR: &str = "#0087ff";

/// The two ProtMiscuity tables and the fields each one contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// `proteina.csv`: sequence and accession code
    Protein,
    /// `sitio_activo.csv`: canonical and promiscuous site positions
    ActiveSite,
}

impl TableKind {
    /// Fields this table supplies to a [`ProteinRecord`]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            TableKind::Protein => &[SEQUENCE_FIELD, ACCESSION_FIELD],
            TableKind::ActiveSite => &[CANONICAL_SITE_FIELD, PROMISCUOUS_SITE_FIELD],
        }
    }

    /// Fields of this kind that `record` lacks
    pub fn missing_fields(self, record: &Record) -> Vec<&'static str> {
        self.fields()
            .iter()
            .copied()
            .filter(|field| !record.contains_key(*field))
            .collect()
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Protein => write!(f, "protein"),
            TableKind::ActiveSite => write!(f, "active site"),
        }
    }
}

/// Unified per-protein record joined from both tables
///
/// Fields missing from either table stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub sequence: String,
    pub accession: String,
    pub canonical_sites: String,
    pub promiscuous_sites: String,
}

impl ProteinRecord {
    /// Copy the fields contributed by `kind` out of a raw table record
    pub fn absorb(&mut self, kind: TableKind, record: &Record) {
        let value = |field: &str| record.get(field).cloned().unwrap_or_default();

        match kind {
            TableKind::Protein => {
                self.sequence = value(SEQUENCE_FIELD);
                self.accession = value(ACCESSION_FIELD);
            },
            TableKind::ActiveSite => {
                self.canonical_sites = value(CANONICAL_SITE_FIELD);
                self.promiscuous_sites = value(PROMISCUOUS_SITE_FIELD);
            },
        }
    }

    /// Raw comma-separated position list for a site kind
    pub fn site_positions(&self, kind: SiteKind) -> &str {
        match kind {
            SiteKind::Canonical => &self.canonical_sites,
            SiteKind::Promiscuous => &self.promiscuous_sites,
        }
    }
}

/// Kind of active site annotated in ProtMiscuity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    Canonical,
    Promiscuous,
}

impl SiteKind {
    /// Track order in every output document
    pub const ALL: [SiteKind; 2] = [SiteKind::Canonical, SiteKind::Promiscuous];

    pub fn field(self) -> &'static str {
        match self {
            SiteKind::Canonical => CANONICAL_SITE_FIELD,
            SiteKind::Promiscuous => PROMISCUOUS_SITE_FIELD,
        }
    }

    /// Track name, also used as hover text of each range
    pub fn label(self) -> &'static str {
        match self {
            SiteKind::Canonical => "canonic site",
            SiteKind::Promiscuous => "promiscuous site",
        }
    }

    pub fn track_colour(self) -> &'static str {
        match self {
            SiteKind::Canonical => "#0087ff",
            SiteKind::Promiscuous => "#FF0054",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            SiteKind::Canonical => "Canonic site residues annotated in ProtMiscuity",
            SiteKind::Promiscuous => "Promiscuous site residues annotated in ProtMiscuity",
        }
    }
}

/// One ProViz `peptides` track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDescriptor {
    #[serde(rename = "type")]
    pub track_type: String,
    pub position: String,
    pub name: String,
    pub colour: String,
    pub help: String,
    pub text_colour: String,
    pub data: Vec<RangeDescriptor>,
}

/// One highlighted residue range inside a track
///
/// `start` and `end` are 1-based, inclusive, and string encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDescriptor {
    pub start: String,
    pub end: String,
    pub sequence: String,
    pub colour: String,
    pub hover: String,
}

/// All tracks for one protein, written to `<accession>.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinDocument {
    pub protein_id: String,
    pub accession: String,
    pub sites: Vec<SiteDescriptor>,
}

impl ProteinDocument {
    /// File name of the document inside the output directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.accession)
    }
}

// The document is a bare array of tracks on disk
impl Serialize for ProteinDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sites.serialize(serializer)
    }
}
