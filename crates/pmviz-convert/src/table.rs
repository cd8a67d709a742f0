//! Semicolon-delimited table parser
//!
//! ProtMiscuity exports its tables as semicolon-delimited text:
//!
//! ```text
//! # exported 2018-11-10
//! "id";"nombre";"secuencia";"codigo_uni_prot"
//! "1";"Lipase B";"MKLLSLTGVAG";"P41365"
//! ```
//!
//! - Lines starting with `#` are comments, even before the header
//! - The first remaining line is the header
//! - Double quotes are stripped everywhere, fields are split on `;`
//! - Rows shorter than the header are padded with [`MISSING_VALUE`]

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, warn};

/// Placeholder for fields missing at the end of a row
pub const MISSING_VALUE: &str = "?";

const COMMENT_PREFIX: char = '#';
const FIELD_SEPARATOR: char = ';';

/// One table row: header field name -> value, in header order
pub type Record = IndexMap<String, String>;

/// Rows of a table grouped by the value of a key field
///
/// Keys iterate in order of first appearance and rows keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedTable {
    rows: IndexMap<String, Vec<Record>>,
}

impl KeyedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record under `key`
    pub fn insert(&mut self, key: impl Into<String>, record: Record) {
        self.rows.entry(key.into()).or_default().push(record);
    }

    /// All records sharing `key`
    pub fn get(&self, key: &str) -> Option<&[Record]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// First record stored under `key`
    pub fn first(&self, key: &str) -> Option<&Record> {
        self.rows.get(key).and_then(|records| records.first())
    }

    /// First record of the table, used to check which fields it carries
    pub fn sample(&self) -> Option<&Record> {
        self.rows.values().next().and_then(|records| records.first())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of records across all keys
    pub fn record_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

/// Parser for semicolon-delimited ProtMiscuity tables
pub struct SdtParser {
    /// Maximum number of records to accept (None for unlimited)
    parse_limit: Option<usize>,
}

impl SdtParser {
    /// Create a new parser with no limit
    pub fn new() -> Self {
        Self { parse_limit: None }
    }

    /// Create a parser that stops after `limit` records
    pub fn with_limit(limit: usize) -> Self {
        Self {
            parse_limit: Some(limit),
        }
    }

    /// Read and parse a table file
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
        key_field: &str,
    ) -> pmviz_common::Result<KeyedTable> {
        let path = path.as_ref();
        debug!(path = %path.display(), key_field, "Parsing table");

        let content = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        let table = self.parse(&content, key_field);

        debug!(
            path = %path.display(),
            keys = table.len(),
            records = table.record_count(),
            "Parsed table"
        );
        Ok(table)
    }

    /// Parse table content, grouping rows by the value of `key_field`
    ///
    /// Malformed rows are logged and skipped; they never abort the parse.
    pub fn parse(&self, content: &str, key_field: &str) -> KeyedTable {
        let mut table = KeyedTable::new();
        let mut header: Option<Vec<String>> = None;
        let mut accepted = 0;

        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;

            if line.trim().is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let columns = match header.as_deref() {
                Some(columns) => columns,
                None => {
                    header = Some(split_fields(line));
                    continue;
                },
            };

            match self.parse_line(columns, line, key_field, line_num) {
                Ok((key, record)) => {
                    table.insert(key, record);
                    accepted += 1;

                    if let Some(limit) = self.parse_limit {
                        if accepted >= limit {
                            debug!("Reached parse limit of {} records", limit);
                            break;
                        }
                    }
                },
                Err(e) => {
                    warn!(line = line_num, content = %line, error = %e, "Skipping line");
                },
            }
        }

        if header.is_none() {
            warn!("Table has no header line");
        }

        table
    }

    /// Parse a single data line against the header
    ///
    /// Returns the key value and the record.
    pub fn parse_line(
        &self,
        header: &[String],
        line: &str,
        key_field: &str,
        line_num: usize,
    ) -> Result<(String, Record)> {
        let fields = split_fields(line);

        let key_index = header
            .iter()
            .position(|name| name == key_field)
            .ok_or_else(|| anyhow!("Line {}: key field '{}' is not in the header", line_num, key_field))?;

        let key = fields.get(key_index).cloned().ok_or_else(|| {
            anyhow!(
                "Line {}: expected key '{}' at field {}, got {} field(s)",
                line_num,
                key_field,
                key_index + 1,
                fields.len()
            )
        })?;

        let record = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = fields
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| MISSING_VALUE.to_string());
                (name.clone(), value)
            })
            .collect();

        Ok((key, record))
    }
}

impl Default for SdtParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip quotes and split a line into fields
fn split_fields(line: &str) -> Vec<String> {
    line.trim()
        .replace('"', "")
        .split(FIELD_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Parse a table file with an unlimited parser
pub fn parse_table(path: impl AsRef<Path>, key_field: &str) -> pmviz_common::Result<KeyedTable> {
    SdtParser::new().parse_file(path, key_field)
}
