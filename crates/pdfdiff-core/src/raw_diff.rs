//! Document-level text diff
//!
//! Runs the diff once over the whole text of both documents, independently of
//! the per-page raster pipeline, and returns the script verbatim.

use crate::diff::{checked_diff, TextDiffer};
use crate::error::CompareError;
use crate::types::{DiffSegment, Document};
use crate::word_index::build_index;

/// Whole-document text: every page's reconstructed text followed by a newline
pub fn document_text(document: &Document, separator: char) -> String {
    document
        .pages
        .iter()
        .map(|page| {
            let mut text = build_index(&page.words, separator).text;
            text.push('\n');
            text
        })
        .collect()
}

/// Diff the full text of two documents
pub fn raw_diff(
    differ: &dyn TextDiffer,
    doc_a: &Document,
    doc_b: &Document,
    separator: char,
) -> Result<Vec<DiffSegment>, CompareError> {
    let text_a = document_text(doc_a, separator);
    let text_b = document_text(doc_b, separator);
    checked_diff(differ, &text_a, &text_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::SemanticDiffer;
    use crate::types::{Operation, Page, Word};
    use crate::word_index::DEFAULT_SEPARATOR;
    use pretty_assertions::assert_eq;

    fn doc(pages: &[&[&str]]) -> Document {
        let pages = pages
            .iter()
            .map(|words| {
                Page::new(
                    words
                        .iter()
                        .map(|t| Word::new(*t, 0.0, 0.0, 1.0, 1.0))
                        .collect(),
                    None,
                )
            })
            .collect();
        Document::new(None, pages)
    }

    #[test]
    fn test_document_text_joins_pages() {
        let d = doc(&[&["a", "b"], &[], &["c"]]);
        assert_eq!(document_text(&d, DEFAULT_SEPARATOR), "a b\n\nc\n");
    }

    #[test]
    fn test_identical_documents_single_equal() {
        let a = doc(&[&["Quote", "42"], &["Total:", "100€"]]);
        let b = a.clone();
        let segments = raw_diff(&SemanticDiffer, &a, &b, DEFAULT_SEPARATOR).unwrap();
        assert_eq!(
            segments,
            vec![DiffSegment::equal("Quote 42\nTotal: 100€\n")]
        );
    }

    #[test]
    fn test_change_spanning_pages_is_reported() {
        let a = doc(&[&["one"], &["two"]]);
        let b = doc(&[&["one"]]);
        let segments = raw_diff(&SemanticDiffer, &a, &b, DEFAULT_SEPARATOR).unwrap();
        let deleted: String = segments
            .iter()
            .filter(|s| s.operation == Operation::Delete)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(deleted, "two\n");
    }
}
