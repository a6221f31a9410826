//! Visual document comparison
//!
//! This crate compares two versions of a paginated document. Each page is
//! given as its extracted words (text + bounding box) and its rendered raster.
//! The crate produces:
//! - a character-level diff of the whole document text (`raw_diff`, plus an
//!   HTML rendering of it)
//! - per page, both rasters with the changed words highlighted: deletions in
//!   translucent red on side A, insertions in translucent green on side B
//!
//! Word extraction and page rendering happen upstream; see [`types::Page`].

pub mod align;
pub mod compare;
pub mod diff;
pub mod error;
pub mod highlight;
pub mod html;
pub mod options;
pub mod overlay;
pub mod raw_diff;
pub mod types;
pub mod word_index;

pub use compare::{compare_documents, compare_documents_with, page_highlights};
pub use diff::{SemanticDiffer, TextDiffer};
pub use error::CompareError;
pub use highlight::AffectedWords;
pub use options::CompareOptions;
pub use overlay::HighlightColor;
pub use types::{
    ComparisonResult, DiffSegment, Document, Highlight, HighlightKind, Operation, Page,
    PageComparison, Side, Word,
};
