//! Join the protein and active site tables into one record per protein

use crate::models::{ProteinRecord, TableKind};
use crate::table::KeyedTable;
use indexmap::IndexMap;
use pmviz_common::{PmvizError, Result};
use tracing::debug;

/// Unified records keyed by protein identifier, in first-seen order
pub type ProteinIndex = IndexMap<String, ProteinRecord>;

/// Merge one table into `index`, returning the extended index
///
/// Only the fields of `kind` are copied, from the first record of each key;
/// later records under the same key are ignored. Proteins new to the index
/// start with every field empty.
///
/// Fails with [`PmvizError::Schema`] when the table's records do not carry
/// the fields `kind` requires.
pub fn merge_table(mut index: ProteinIndex, table: &KeyedTable, kind: TableKind) -> Result<ProteinIndex> {
    let Some(sample) = table.sample() else {
        debug!(%kind, "Empty table, nothing to merge");
        return Ok(index);
    };

    let missing = kind.missing_fields(sample);
    if !missing.is_empty() {
        return Err(PmvizError::schema(kind.to_string(), &missing));
    }

    for (protein_id, records) in table.iter() {
        if records.len() > 1 {
            debug!(
                protein_id,
                %kind,
                ignored = records.len() - 1,
                "Duplicate rows for protein, using the first"
            );
        }

        if let Some(first) = records.first() {
            index
                .entry(protein_id.to_string())
                .or_default()
                .absorb(kind, first);
        }
    }

    Ok(index)
}

/// Join the protein table and the active site table
///
/// Proteins from the protein table come first, followed by proteins that
/// only appear in the active site table.
pub fn join(proteins: &KeyedTable, sites: &KeyedTable) -> Result<ProteinIndex> {
    let index = merge_table(ProteinIndex::new(), proteins, TableKind::Protein)?;
    let index = merge_table(index, sites, TableKind::ActiveSite)?;

    debug!(
        proteins = index.len(),
        with_sequence = proteins.len(),
        with_sites = sites.len(),
        "Joined tables"
    );
    Ok(index)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::table::SdtParser;

    fn proteins() -> KeyedTable {
        SdtParser::new().parse(
            "id;nombre;secuencia;codigo_uni_prot\n\
             1;Lipase B;MKLLSLTGVAG;P41365\n\
             2;Anhydrase;MSHHWGYGKH;P00918\n",
            "id",
        )
    }

    fn sites() -> KeyedTable {
        SdtParser::new().parse(
            "id;proteina_id;can_act_site;prom_act_site\n\
             10;1;105,106;ND\n\
             11;1;1,2,3;4\n\
             12;3;7;\n",
            "proteina_id",
        )
    }

    #[test]
    fn test_join_fills_all_fields() {
        let index = join(&proteins(), &sites()).unwrap();

        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(
            index["1"],
            ProteinRecord {
                sequence: "MKLLSLTGVAG".to_string(),
                accession: "P41365".to_string(),
                canonical_sites: "105,106".to_string(),
                promiscuous_sites: "ND".to_string(),
            }
        );
    }

    #[test]
    fn test_protein_in_one_table_only() {
        let index = join(&proteins(), &sites()).unwrap();

        // No active site rows
        assert_eq!(index["2"].accession, "P00918");
        assert_eq!(index["2"].canonical_sites, "");
        assert_eq!(index["2"].promiscuous_sites, "");

        // No protein row
        assert_eq!(index["3"].sequence, "");
        assert_eq!(index["3"].accession, "");
        assert_eq!(index["3"].canonical_sites, "7");
    }

    #[test]
    fn test_first_record_wins() {
        let index = join(&proteins(), &sites()).unwrap();
        assert_eq!(index["1"].canonical_sites, "105,106");
    }

    #[test]
    fn test_merge_order_does_not_change_fields() {
        let forward = join(&proteins(), &sites()).unwrap();

        let reverse = merge_table(ProteinIndex::new(), &sites(), TableKind::ActiveSite).unwrap();
        let reverse = merge_table(reverse, &proteins(), TableKind::Protein).unwrap();

        for (id, record) in &forward {
            assert_eq!(&reverse[id.as_str()], record);
        }
        assert_eq!(forward.len(), reverse.len());
    }

    #[test]
    fn test_wrong_kind_is_schema_error() {
        let err = merge_table(ProteinIndex::new(), &proteins(), TableKind::ActiveSite).unwrap_err();

        assert!(matches!(err, PmvizError::Schema { .. }));
        assert!(err.to_string().contains("can_act_site, prom_act_site"));
    }

    #[test]
    fn test_empty_table_merges_nothing() {
        let index = merge_table(ProteinIndex::new(), &KeyedTable::new(), TableKind::Protein).unwrap();
        assert!(index.is_empty());
    }
}
