//! Error types for pmviz

use thiserror::Error;

/// Result type alias for pmviz operations
pub type Result<T> = std::result::Result<T, PmvizError>;

/// Main error type for pmviz
#[derive(Error, Debug)]
pub enum PmvizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A table does not carry the fields its declared kind requires
    #[error("Schema error in {table} table: missing field(s) {missing}")]
    Schema { table: String, missing: String },

    /// A site position list holds a token that is not an integer
    #[error("Invalid site position '{token}'")]
    InvalidPosition { token: String },

    /// Wraps an error with the protein it was raised for
    #[error("Protein {protein_id}: {source}")]
    Protein {
        protein_id: String,
        #[source]
        source: Box<PmvizError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl PmvizError {
    /// Create a schema error from the list of missing fields
    pub fn schema(table: impl Into<String>, missing: &[&str]) -> Self {
        Self::Schema {
            table: table.into(),
            missing: missing.join(", "),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach the protein identifier to an error
    pub fn for_protein(self, protein_id: impl Into<String>) -> Self {
        Self::Protein {
            protein_id: protein_id.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_message_lists_fields() {
        let err = PmvizError::schema("protein", &["secuencia", "codigo_uni_prot"]);
        assert_eq!(
            err.to_string(),
            "Schema error in protein table: missing field(s) secuencia, codigo_uni_prot"
        );
    }

    #[test]
    fn test_for_protein_wraps_source() {
        let err = PmvizError::InvalidPosition {
            token: "x1".to_string(),
        }
        .for_protein("42");

        assert_eq!(err.to_string(), "Protein 42: Invalid site position 'x1'");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Invalid site position 'x1'");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PmvizError = io.into();
        assert!(matches!(err, PmvizError::Io(_)));
    }
}
