//! Document manifests
//!
//! A manifest describes one extracted document: per page, the words with their
//! boxes (points) and the path of the page raster rendered by the upstream
//! tool. Image paths are resolved relative to the manifest file.
//!
//! ```json
//! {
//!   "name": "quote-v1.pdf",
//!   "pages": [
//!     { "words": [{"text": "Total:", "x0": 0, "top": 0, "x1": 40, "bottom": 10}],
//!       "image": "quote-v1-1.png" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use pdfdiff_core::overlay::decode_raster;
use pdfdiff_core::{CompareError, Document, Page, Word};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid page image {path}: {source}")]
    Image {
        path: PathBuf,
        source: CompareError,
    },
}

#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    #[serde(default)]
    pub words: Vec<Word>,
    /// Rendered page raster, relative to the manifest
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Load a manifest and decode every referenced page raster
pub fn load_document(path: &Path) -> Result<Document, ManifestError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest = serde_json::from_str(&raw).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = manifest.name.or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    });

    let pages = manifest
        .pages
        .into_iter()
        .map(|entry| load_page(base_dir, entry))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Loaded {} page(s) from {}", pages.len(), path.display());
    Ok(Document::new(name, pages))
}

fn load_page(base_dir: &Path, entry: PageEntry) -> Result<Page, ManifestError> {
    let image = match entry.image {
        Some(relative) => {
            let path = base_dir.join(relative);
            let bytes = std::fs::read(&path).map_err(|source| ManifestError::Io {
                path: path.clone(),
                source,
            })?;
            let raster =
                decode_raster(&bytes).map_err(|source| ManifestError::Image { path, source })?;
            Some(raster)
        }
        None => None,
    };
    Ok(Page::new(entry.words, image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn write_png(path: &Path) {
        RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_load_manifest_with_images() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("p1.png"));
        let manifest = dir.path().join("v1.json");
        std::fs::write(
            &manifest,
            r#"{"name":"quote.pdf","pages":[
                {"words":[{"text":"Total:","x0":0,"top":0,"x1":40,"bottom":10}],"image":"p1.png"},
                {"words":[]}
            ]}"#,
        )
        .unwrap();

        let doc = load_document(&manifest).unwrap();
        assert_eq!(doc.name.as_deref(), Some("quote.pdf"));
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].words[0].text, "Total:");
        assert_eq!(doc.pages[0].image.as_ref().unwrap().dimensions(), (4, 3));
        assert!(doc.pages[1].is_empty());
    }

    #[test]
    fn test_name_defaults_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("offer-2.json");
        std::fs::write(&manifest, r#"{"pages":[]}"#).unwrap();
        let doc = load_document(&manifest).unwrap();
        assert_eq!(doc.name.as_deref(), Some("offer-2"));
    }

    #[test]
    fn test_missing_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("v1.json");
        std::fs::write(&manifest, r#"{"pages":[{"words":[],"image":"nope.png"}]}"#).unwrap();
        let err = load_document(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("v1.json");
        std::fs::write(&manifest, "{not json").unwrap();
        let err = load_document(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Json { .. }));
    }

    #[test]
    fn test_corrupt_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"garbage").unwrap();
        let manifest = dir.path().join("v1.json");
        std::fs::write(&manifest, r#"{"pages":[{"image":"bad.png"}]}"#).unwrap();
        let err = load_document(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Image { .. }));
    }
}
