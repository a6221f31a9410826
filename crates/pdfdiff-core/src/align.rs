//! Page alignment
//!
//! Pairs page `i` of one document with page `i` of the other. The shorter
//! document is padded with empty pages; unequal page counts are an expected
//! outcome (pages added or removed between versions), not an error.

use std::borrow::Cow;

use crate::types::{Document, Page, Side};

/// A page pair at a given position
#[derive(Debug, Clone)]
pub struct AlignedPage<'a> {
    /// Page number (1-indexed)
    pub number: usize,
    pub a: Cow<'a, Page>,
    pub b: Cow<'a, Page>,
}

impl AlignedPage<'_> {
    /// The page of the pair belonging to `side`
    pub fn page(&self, side: Side) -> &Page {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

/// Align the pages of two documents, producing `max(len(a), len(b))` pairs
pub fn align_pages<'a>(doc_a: &'a Document, doc_b: &'a Document) -> Vec<AlignedPage<'a>> {
    let count = doc_a.pages.len().max(doc_b.pages.len());

    (0..count)
        .map(|i| AlignedPage {
            number: i + 1,
            a: page_or_empty(&doc_a.pages, i),
            b: page_or_empty(&doc_b.pages, i),
        })
        .collect()
}

fn page_or_empty(pages: &[Page], index: usize) -> Cow<'_, Page> {
    match pages.get(index) {
        Some(page) => Cow::Borrowed(page),
        None => Cow::Owned(Page::empty()),
    }
}
