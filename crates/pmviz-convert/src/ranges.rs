//! Collapse residue positions into contiguous ranges

use serde::{Serialize, Serializer};

/// A maximal run of consecutive residue positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionRange {
    /// An isolated position
    Single(i64),
    /// An inclusive run `start..=end` with `start < end`
    Span(i64, i64),
}

impl PositionRange {
    pub fn start(self) -> i64 {
        match self {
            PositionRange::Single(p) => p,
            PositionRange::Span(start, _) => start,
        }
    }

    pub fn end(self) -> i64 {
        match self {
            PositionRange::Single(p) => p,
            PositionRange::Span(_, end) => end,
        }
    }

    /// Number of positions in the range
    pub fn width(self) -> u64 {
        self.end().abs_diff(self.start()) + 1
    }

    pub fn contains(self, position: i64) -> bool {
        (self.start()..=self.end()).contains(&position)
    }

    /// Every position covered by the range
    pub fn positions(self) -> impl Iterator<Item = i64> {
        self.start()..=self.end()
    }
}

// `[p]` or `[start, end]`
impl Serialize for PositionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            PositionRange::Single(p) => [p].serialize(serializer),
            PositionRange::Span(start, end) => [start, end].serialize(serializer),
        }
    }
}

/// Collapse positions into the minimal ascending list of maximal runs
///
/// Input order is irrelevant and repeated positions count once.
///
/// ```
/// use pmviz_convert::ranges::{find_ranges, PositionRange};
///
/// let ranges = find_ranges(vec![12, 5, 7, 6, 10]);
/// assert_eq!(
///     ranges,
///     vec![
///         PositionRange::Span(5, 7),
///         PositionRange::Single(10),
///         PositionRange::Single(12),
///     ]
/// );
/// ```
pub fn find_ranges(mut positions: Vec<i64>) -> Vec<PositionRange> {
    positions.sort_unstable();
    positions.dedup();

    let mut ranges = Vec::new();
    let mut iter = positions.into_iter();

    let Some(mut start) = iter.next() else {
        return ranges;
    };
    let mut end = start;

    for position in iter {
        if end.checked_add(1) == Some(position) {
            end = position;
        } else {
            ranges.push(run(start, end));
            start = position;
            end = position;
        }
    }
    ranges.push(run(start, end));

    ranges
}

fn run(start: i64, end: i64) -> PositionRange {
    if start == end {
        PositionRange::Single(start)
    } else {
        PositionRange::Span(start, end)
    }
}
