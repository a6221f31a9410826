//! Comparison settings

use serde::{Deserialize, Serialize};

use crate::overlay::HighlightColor;
use crate::types::HighlightKind;
use crate::word_index::DEFAULT_SEPARATOR;

/// Scale between word coordinates (points) and raster pixels for pages
/// rendered at 144 DPI
pub const DEFAULT_SCALE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Word-space to pixel-space factor (raster DPI / 72 for point coordinates)
    pub scale: f32,
    pub delete_color: HighlightColor,
    pub insert_color: HighlightColor,
    /// Worker threads for per-page work; `None` uses the global rayon pool
    pub workers: Option<usize>,
    /// Character placed between words when rebuilding page text
    pub separator: char,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            delete_color: HighlightColor::DELETE,
            insert_color: HighlightColor::INSERT,
            workers: None,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl CompareOptions {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_colors(mut self, delete: HighlightColor, insert: HighlightColor) -> Self {
        self.delete_color = delete;
        self.insert_color = insert;
        self
    }

    /// Fill color used for highlights of `kind`
    pub fn color_for(&self, kind: HighlightKind) -> HighlightColor {
        match kind {
            HighlightKind::Delete => self.delete_color,
            HighlightKind::Insert => self.insert_color,
        }
    }
}
