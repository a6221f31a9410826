use thiserror::Error;

use crate::types::Side;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("No comparable content: both documents have zero pages")]
    NoComparableContent,

    #[error("Diff script consumed {consumed} characters of side {side}, expected {expected}")]
    InconsistentDiff {
        side: Side,
        expected: usize,
        consumed: usize,
    },

    #[error("Diff script does not reconstruct the text of side {side}")]
    NonExhaustiveDiff { side: Side },

    #[error("Failed to encode page {page} side {side}: {message}")]
    Encode {
        page: usize,
        side: Side,
        message: String,
    },

    #[error("Failed to decode raster: {0}")]
    Decode(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl CompareError {
    /// True when the failure means the diff primitive broke its contract
    pub fn is_internal_inconsistency(&self) -> bool {
        matches!(
            self,
            CompareError::InconsistentDiff { .. } | CompareError::NonExhaustiveDiff { .. }
        )
    }
}
