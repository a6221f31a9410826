//! pdfdiff
//!
//! Compares two versions of an extracted document and writes:
//!
//! - the comparison result as JSON (raw text diff, HTML diff, and per page the
//!   highlighted images as base64 PNG)
//! - optionally, the highlighted page images as PNG files
//!
//! Input documents are manifests produced by the extraction step (words with
//! boxes + rendered page PNGs); see `manifest.rs`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine;
use clap::Parser;
use pdfdiff_core::{compare_documents, CompareOptions, ComparisonResult, Side};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod manifest;

/// Command-line arguments for pdfdiff
#[derive(Parser, Debug)]
#[command(name = "pdfdiff")]
#[command(about = "Compare two document versions and highlight changed words")]
struct Args {
    /// Manifest of the original document
    doc_a: PathBuf,

    /// Manifest of the revised document
    doc_b: PathBuf,

    /// Write the JSON result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write highlighted pages as PNG files into this directory
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// JSON file with comparison options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word-coordinate to pixel scale (raster DPI / 72)
    #[arg(long)]
    scale: Option<f32>,

    /// Worker threads for page processing
    #[arg(long)]
    workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = load_options(&args)?;
    info!(
        "Options: scale={}, workers={:?}",
        options.scale, options.workers
    );

    let doc_a = manifest::load_document(&args.doc_a)?;
    let doc_b = manifest::load_document(&args.doc_b)?;

    let result = compare_documents(&doc_a, &doc_b, &options).context("Comparison failed")?;

    for page in result.pages.iter().filter(|p| !p.errors.is_empty()) {
        warn!("Page {} degraded: {}", page.page, page.errors.join("; "));
    }

    if let Some(dir) = &args.images_dir {
        write_images(dir, &result)?;
    }

    let json = serde_json::to_string_pretty(&result)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Result written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Options file first, then command-line overrides
fn load_options(args: &Args) -> anyhow::Result<CompareOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => CompareOptions::default(),
    };

    if let Some(scale) = args.scale {
        options.scale = scale;
    }
    if let Some(workers) = args.workers {
        options.workers = Some(workers);
    }
    Ok(options)
}

fn write_images(dir: &Path, result: &ComparisonResult) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let engine = base64::engine::general_purpose::STANDARD;
    for page in &result.pages {
        let sides = [(Side::A, &page.image_a), (Side::B, &page.image_b)];
        for (side, image) in sides {
            let Some(data) = image else { continue };
            let path = dir.join(image_file_name(page.page, side));
            let bytes = engine.decode(data)?;
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    info!("Page images written to {}", dir.display());
    Ok(())
}

fn image_file_name(page: usize, side: Side) -> String {
    match side {
        Side::A => format!("page-{}-a.png", page),
        Side::B => format!("page-{}-b.png", page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pdfdiff", "a.json", "b.json"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_default_options() {
        let options = load_options(&args(&[])).unwrap();
        assert_eq!(options, CompareOptions::default());
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("options.json");
        std::fs::write(&config, r#"{"scale": 3.0, "workers": 2}"#).unwrap();
        let config_arg = config.to_string_lossy().into_owned();

        let options = load_options(&args(&["--config", &config_arg, "--scale", "1.5"])).unwrap();
        assert_eq!(options.scale, 1.5);
        assert_eq!(options.workers, Some(2));
    }

    #[test]
    fn test_image_file_names() {
        assert_eq!(image_file_name(3, Side::A), "page-3-a.png");
        assert_eq!(image_file_name(3, Side::B), "page-3-b.png");
    }
}
