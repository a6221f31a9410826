//! Character-level diff primitive
//!
//! The edit-distance algorithm itself comes from `dissimilar` (diff-match-patch
//! with its semantic cleanup pass). The rest of the pipeline only relies on the
//! contract: the script is ordered, exhaustive, and a pure function of its two
//! inputs.

use dissimilar::Chunk;

use crate::error::CompareError;
use crate::types::{DiffSegment, Operation, Side};

/// Computes an edit script turning `a` into `b`
pub trait TextDiffer: Send + Sync {
    fn diff(&self, a: &str, b: &str) -> Vec<DiffSegment>;
}

/// diff-match-patch diff followed by semantic cleanup
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticDiffer;

impl TextDiffer for SemanticDiffer {
    fn diff(&self, a: &str, b: &str) -> Vec<DiffSegment> {
        dissimilar::diff(a, b)
            .into_iter()
            .map(|chunk| match chunk {
                Chunk::Equal(text) => DiffSegment::equal(text),
                Chunk::Delete(text) => DiffSegment::delete(text),
                Chunk::Insert(text) => DiffSegment::insert(text),
            })
            .collect()
    }
}

/// Text of one side as described by the script
pub fn reconstruct(segments: &[DiffSegment], side: Side) -> String {
    let keep = match side {
        Side::A => Operation::Delete,
        Side::B => Operation::Insert,
    };

    segments
        .iter()
        .filter(|s| s.operation == Operation::Equal || s.operation == keep)
        .map(|s| s.text.as_str())
        .collect()
}

/// Check that the script reproduces both inputs exactly
pub fn verify_exhaustive(segments: &[DiffSegment], a: &str, b: &str) -> Result<(), CompareError> {
    if reconstruct(segments, Side::A) != a {
        return Err(CompareError::NonExhaustiveDiff { side: Side::A });
    }
    if reconstruct(segments, Side::B) != b {
        return Err(CompareError::NonExhaustiveDiff { side: Side::B });
    }
    Ok(())
}

/// Diff two texts and verify the script before handing it on
pub fn checked_diff(
    differ: &dyn TextDiffer,
    a: &str,
    b: &str,
) -> Result<Vec<DiffSegment>, CompareError> {
    let segments = differ.diff(a, b);
    verify_exhaustive(&segments, a, b)?;
    Ok(segments)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: Delete+Equal rebuilds A, Insert+Equal rebuilds B
        #[test]
        fn script_is_exhaustive(a in "[a-c €\n]{0,30}", b in "[a-c €\n]{0,30}") {
            let segments = SemanticDiffer.diff(&a, &b);
            prop_assert_eq!(reconstruct(&segments, Side::A), a);
            prop_assert_eq!(reconstruct(&segments, Side::B), b);
        }

        /// Property: the diff is a pure function of its inputs
        #[test]
        fn script_is_deterministic(a in "[a-z ]{0,30}", b in "[a-z ]{0,30}") {
            prop_assert_eq!(SemanticDiffer.diff(&a, &b), SemanticDiffer.diff(&a, &b));
        }
    }
}
