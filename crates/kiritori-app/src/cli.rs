use std::path::PathBuf;

use clap::Parser;

/// Batch OCR for captured screen regions: conditions each image, runs the
/// multi-pass recognition engine, and prints the corrected text.
#[derive(Debug, Parser)]
#[command(name = "kiritori", version)]
pub struct Cli {
    /// Image files to recognize, processed in order.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// JSON configuration file; defaults plus environment otherwise.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the primary language tag (e.g. "jpn").
    #[arg(long)]
    pub lang: Option<String>,

    /// Re-OCR low-confidence lines on cropped sub-images.
    #[arg(long)]
    pub line_reocr: bool,
}
