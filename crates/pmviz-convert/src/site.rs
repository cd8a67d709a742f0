//! Build ProViz tracks from active site position lists

use crate::models::{RangeDescriptor, SiteDescriptor, SiteKind, RANGE_COLOUR};
use crate::ranges::{find_ranges, PositionRange};
use pmviz_common::{PmvizError, Result};

/// Marker for a position that could not be determined
pub const NOT_DETERMINED: &str = "ND";

const TRACK_TYPE: &str = "peptides";
const TRACK_POSITION: &str = "-1";
const TEXT_COLOUR: &str = "#000";

/// Parse a comma-separated position list
///
/// `ND` tokens are dropped. A list that is then empty, or holds only empty
/// tokens, has no positions. Any other token must be an integer.
pub fn parse_positions(positions_csv: &str) -> Result<Vec<i64>> {
    let tokens: Vec<&str> = positions_csv
        .split(',')
        .map(str::trim)
        .filter(|token| *token != NOT_DETERMINED)
        .collect();

    if tokens.iter().all(|token| token.is_empty()) {
        return Ok(Vec::new());
    }

    tokens
        .into_iter()
        .map(|token| {
            token.parse::<i64>().map_err(|_| PmvizError::InvalidPosition {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Residues `start..=end` (1-based) of `sequence`, clamped to its bounds
pub fn excerpt(sequence: &str, range: PositionRange) -> String {
    let from = range.start().saturating_sub(1).max(0) as usize;
    let to = range.end().max(0) as usize;

    if to <= from {
        return String::new();
    }
    sequence.chars().skip(from).take(to - from).collect()
}

/// Build the range entries of one track
pub fn build_site_data(kind: SiteKind, positions_csv: &str, sequence: &str) -> Result<Vec<RangeDescriptor>> {
    let positions = parse_positions(positions_csv)?;

    Ok(find_ranges(positions)
        .into_iter()
        .map(|range| RangeDescriptor {
            start: range.start().to_string(),
            end: range.end().to_string(),
            sequence: excerpt(sequence, range),
            colour: RANGE_COLOUR.to_string(),
            hover: kind.label().to_string(),
        })
        .collect())
}

/// Build a complete track for one site kind
pub fn build_site_descriptor(kind: SiteKind, positions_csv: &str, sequence: &str) -> Result<SiteDescriptor> {
    Ok(SiteDescriptor {
        track_type: TRACK_TYPE.to_string(),
        position: TRACK_POSITION.to_string(),
        name: kind.label().to_string(),
        colour: kind.track_colour().to_string(),
        help: kind.help().to_string(),
        text_colour: TEXT_COLOUR.to_string(),
        data: build_site_data(kind, positions_csv, sequence)?,
    })
}
