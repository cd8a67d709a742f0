//! Assemble the ProViz document of a single protein

use crate::models::{ProteinDocument, ProteinRecord, SiteKind};
use crate::site::build_site_descriptor;
use pmviz_common::Result;
use tracing::trace;

/// Build the tracks of one protein
///
/// Tracks follow [`SiteKind::ALL`] order. A site kind contributes a track
/// only when its position list is non-empty and yields at least one range.
/// Returns `None` when the protein has no track at all.
pub fn assemble(protein_id: &str, record: &ProteinRecord) -> Result<Option<ProteinDocument>> {
    let mut sites = Vec::with_capacity(SiteKind::ALL.len());

    for kind in SiteKind::ALL {
        let positions = record.site_positions(kind);
        if positions.is_empty() {
            continue;
        }

        let descriptor = build_site_descriptor(kind, positions, &record.sequence)
            .map_err(|e| e.for_protein(protein_id))?;

        if descriptor.data.is_empty() {
            trace!(protein_id, field = kind.field(), "No determined positions");
            continue;
        }
        sites.push(descriptor);
    }

    if sites.is_empty() {
        return Ok(None);
    }

    Ok(Some(ProteinDocument {
        protein_id: protein_id.to_string(),
        accession: record.accession.clone(),
        sites,
    }))
}
