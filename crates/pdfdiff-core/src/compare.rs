//! Comparison pipeline
//!
//! The algorithm:
//! 1. Reject a comparison where neither document has a page
//! 2. Diff the whole-document text once (raw diff + HTML rendering)
//! 3. Align pages, padding the shorter document with empty pages
//! 4. For each page pair, in parallel:
//!    a. Rebuild both page texts with their character-to-word index
//!    b. Diff the page texts
//!    c. Attribute delete spans to side A words, insert spans to side B words
//!    d. Draw the highlights over copies of both rasters and encode them
//! 5. Sort the page results by page number and assemble the result
//!
//! Failures in the shared text pipeline abort the comparison. Encoding
//! failures only null out the affected image and are recorded on the page.

use std::time::Instant;

use base64::Engine;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::align::{align_pages, AlignedPage};
use crate::diff::{checked_diff, SemanticDiffer, TextDiffer};
use crate::error::CompareError;
use crate::highlight::{aggregate, AffectedWords};
use crate::html::pretty_html;
use crate::options::CompareOptions;
use crate::overlay::{encode_png, render_overlay};
use crate::raw_diff::raw_diff;
use crate::types::{ComparisonResult, Document, HighlightKind, Page, PageComparison, Side};
use crate::word_index::build_index;

/// Compare two documents with the default diff primitive
pub fn compare_documents(
    doc_a: &Document,
    doc_b: &Document,
    options: &CompareOptions,
) -> Result<ComparisonResult, CompareError> {
    compare_documents_with(&SemanticDiffer, doc_a, doc_b, options)
}

/// Compare two documents using the given diff primitive
pub fn compare_documents_with(
    differ: &dyn TextDiffer,
    doc_a: &Document,
    doc_b: &Document,
    options: &CompareOptions,
) -> Result<ComparisonResult, CompareError> {
    if doc_a.pages.is_empty() && doc_b.pages.is_empty() {
        return Err(CompareError::NoComparableContent);
    }

    let started = Instant::now();
    info!(
        "Comparing documents: {} page(s) vs {} page(s)",
        doc_a.pages.len(),
        doc_b.pages.len()
    );

    let raw = raw_diff(differ, doc_a, doc_b, options.separator)?;
    let html_diff = pretty_html(&raw);

    let aligned = align_pages(doc_a, doc_b);
    let mut pages = match options.workers {
        Some(workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| CompareError::WorkerPool(e.to_string()))?;
            pool.install(|| process_pages(differ, &aligned, options))?
        }
        None => process_pages(differ, &aligned, options)?,
    };
    pages.sort_by_key(|p| p.page);

    info!(
        "Compared {} page(s), {} raw segment(s) in {}ms",
        pages.len(),
        raw.len(),
        started.elapsed().as_millis()
    );

    Ok(ComparisonResult {
        name_a: doc_a.name.clone(),
        name_b: doc_b.name.clone(),
        raw_diff: raw,
        html_diff,
        pages,
    })
}

fn process_pages(
    differ: &dyn TextDiffer,
    aligned: &[AlignedPage<'_>],
    options: &CompareOptions,
) -> Result<Vec<PageComparison>, CompareError> {
    aligned
        .par_iter()
        .map(|pair| compare_page(differ, pair, options))
        .collect()
}

/// Words changed between two pages
pub fn page_highlights(
    differ: &dyn TextDiffer,
    page_a: &Page,
    page_b: &Page,
    separator: char,
) -> Result<AffectedWords, CompareError> {
    let indexed_a = build_index(&page_a.words, separator);
    let indexed_b = build_index(&page_b.words, separator);
    let segments = checked_diff(differ, &indexed_a.text, &indexed_b.text)?;
    aggregate(&segments, &indexed_a.map, &indexed_b.map)
}

fn compare_page(
    differ: &dyn TextDiffer,
    pair: &AlignedPage<'_>,
    options: &CompareOptions,
) -> Result<PageComparison, CompareError> {
    let affected = page_highlights(differ, &pair.a, &pair.b, options.separator)?;
    debug!(
        "Page {}: {} deleted word(s), {} inserted word(s)",
        pair.number,
        affected.a.len(),
        affected.b.len()
    );

    // Deletions are drawn on side A, insertions on side B
    let mut errors = Vec::new();
    let [image_a, image_b] = [HighlightKind::Delete, HighlightKind::Insert].map(|kind| {
        let side = kind.side();
        let page = pair.page(side);
        let rendered = render_overlay(
            page.image.as_ref(),
            &page.words,
            affected.words(kind),
            options.scale,
            options.color_for(kind),
        );
        encode_side(rendered, pair.number, side, &mut errors)
    });

    Ok(PageComparison {
        page: pair.number,
        image_a,
        image_b,
        errors,
    })
}

fn encode_side(
    image: Option<image::RgbaImage>,
    page: usize,
    side: Side,
    errors: &mut Vec<String>,
) -> Option<String> {
    let image = image?;
    match encode_png(image) {
        Ok(bytes) => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        Err(e) => {
            let err = CompareError::Encode {
                page,
                side,
                message: e.to_string(),
            };
            warn!("{}", err);
            errors.push(err.to_string());
            None
        }
    }
}
