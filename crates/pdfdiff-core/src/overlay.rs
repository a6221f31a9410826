//! Highlight overlay rendering
//!
//! Highlights are filled onto a fresh transparent layer the size of the page
//! raster, then alpha-composited over a copy of the base raster. The input
//! raster is never modified. Rectangles are filled (not blended) on the layer,
//! so overlapping word boxes do not darken beyond a single fill.

use std::collections::BTreeSet;
use std::io::Cursor;

use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CompareError;
use crate::types::Word;

/// Translucent RGBA fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HighlightColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Red, used for deletions on side A
    pub const DELETE: HighlightColor = HighlightColor::rgba(255, 0, 0, 100);

    /// Green, used for insertions on side B
    pub const INSERT: HighlightColor = HighlightColor::rgba(0, 255, 0, 100);

    fn pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Pixel rectangle, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Map a word box into pixel space, clipped to the raster.
///
/// Returns `None` for boxes that are not finite, inverted, or entirely outside
/// the raster.
pub fn word_rect(word: &Word, scale: f32, width: u32, height: u32) -> Option<PixelRect> {
    let coords = [word.x0, word.top, word.x1, word.bottom].map(|v| v * scale);
    if coords.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let [x0, top, x1, bottom] = coords;
    if x1 < x0 || bottom < top {
        return None;
    }

    let clamp = |v: f32, max: u32| v.max(0.0).min(max as f32) as u32;
    let rect = PixelRect {
        left: clamp(x0.floor(), width),
        top: clamp(top.floor(), height),
        right: clamp(x1.ceil(), width),
        bottom: clamp(bottom.ceil(), height),
    };

    if rect.left >= rect.right || rect.top >= rect.bottom {
        return None;
    }
    Some(rect)
}

/// Draw the affected words of one side over a copy of `base`.
///
/// Returns `None` when the page does not exist on this side. Word indices
/// outside `words` and unusable boxes are skipped.
pub fn render_overlay(
    base: Option<&RgbaImage>,
    words: &[Word],
    affected: &BTreeSet<usize>,
    scale: f32,
    color: HighlightColor,
) -> Option<RgbaImage> {
    let base = base?;
    let (width, height) = base.dimensions();
    let mut layer = RgbaImage::new(width, height);
    let fill = color.pixel();

    for &index in affected {
        let Some(word) = words.get(index) else {
            warn!("Highlight references missing word {}", index);
            continue;
        };
        let Some(rect) = word_rect(word, scale, width, height) else {
            warn!(
                "Skipping unusable box for word {} ({:?}): [{}, {}, {}, {}]",
                index, word.text, word.x0, word.top, word.x1, word.bottom
            );
            continue;
        };
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                layer.put_pixel(x, y, fill);
            }
        }
    }

    let mut output = base.clone();
    imageops::overlay(&mut output, &layer, 0, 0);
    Some(output)
}

/// Flatten to opaque RGB and encode as PNG
pub fn encode_png(image: RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decode an encoded page image (PNG) into an RGBA raster
pub fn decode_raster(bytes: &[u8]) -> Result<RgbaImage, CompareError> {
    image::load_from_memory(bytes)
        .map(|img| img.into_rgba8())
        .map_err(|e| CompareError::Decode(e.to_string()))
}
