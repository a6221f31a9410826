//! Diff span to word attribution
//!
//! Walks an edit script with one cursor per side and collects, for every
//! delete (side A) and insert (side B) span, the indices of the words whose
//! characters the span covers. Spans that only cover separators flag nothing,
//! so whitespace-only edits between words are not highlighted.
//!
//! This is a pure function of `(segments, maps)` and needs no raster or file
//! access.

use std::collections::BTreeSet;

use crate::error::CompareError;
use crate::types::{DiffSegment, HighlightKind, Operation, Side};
use crate::word_index::CharIndexMap;

/// Words touched by the script on each side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedWords {
    /// Words of side A covered by a delete span
    pub a: BTreeSet<usize>,
    /// Words of side B covered by an insert span
    pub b: BTreeSet<usize>,
}

impl AffectedWords {
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    /// Words flagged with `kind`, on the side that kind is drawn on
    pub fn words(&self, kind: HighlightKind) -> &BTreeSet<usize> {
        match kind.side() {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

/// Attribute a page's edit script to the words of both sides.
///
/// The cursors must end exactly at the end of each side's text; anything else
/// means the script does not describe these texts and is reported as
/// [`CompareError::InconsistentDiff`].
pub fn aggregate(
    segments: &[DiffSegment],
    map_a: &CharIndexMap,
    map_b: &CharIndexMap,
) -> Result<AffectedWords, CompareError> {
    let mut affected = AffectedWords::default();
    let mut cursor_a = 0usize;
    let mut cursor_b = 0usize;

    for segment in segments {
        let len = segment.char_len();
        match segment.operation {
            Operation::Equal => {
                cursor_a += len;
                cursor_b += len;
            }
            Operation::Delete => {
                collect_span(map_a, cursor_a, len, &mut affected.a);
                cursor_a += len;
            }
            Operation::Insert => {
                collect_span(map_b, cursor_b, len, &mut affected.b);
                cursor_b += len;
            }
        }
    }

    check_consumed(Side::A, map_a, cursor_a)?;
    check_consumed(Side::B, map_b, cursor_b)?;

    Ok(affected)
}

fn collect_span(map: &CharIndexMap, start: usize, len: usize, out: &mut BTreeSet<usize>) {
    out.extend((start..start + len).filter_map(|k| map.word_at(k)));
}

fn check_consumed(side: Side, map: &CharIndexMap, consumed: usize) -> Result<(), CompareError> {
    if consumed != map.len() {
        return Err(CompareError::InconsistentDiff {
            side,
            expected: map.len(),
            consumed,
        });
    }
    Ok(())
}
