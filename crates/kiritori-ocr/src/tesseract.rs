//! Recognizer backed by the `tesseract` binary.
//!
//! Each invocation is one subprocess: the conditioned image goes in as PNG
//! on stdin, TSV comes back on stdout. No retries here; the engine decides
//! what to do with a failed attempt.

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use image::{GrayImage, ImageFormat};
use kiritori_config::tesseract::TesseractConfig;
use kiritori_core::error::{BoxError, Error};
use kiritori_core::{RecognizeOptions, Recognizer};
use kiritori_types::{RecognitionResult, SegmentationMode};

use crate::tsv;

pub struct TesseractRecognizer {
    binary: String,
    tessdata_dir: Option<String>,
}

impl TesseractRecognizer {
    pub fn new(config: &TesseractConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }

    /// Probe the engine once, for startup logging and fail-fast checks.
    pub fn version(&self) -> Result<String, Error> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| Error::EngineUnavailable(Box::new(e)))?;
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text.lines().next().unwrap_or("unknown").to_string())
    }

    fn page_seg_mode(mode: SegmentationMode) -> &'static str {
        match mode {
            SegmentationMode::UniformBlock => "6",
            SegmentationMode::SingleLine => "7",
        }
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(
        &self,
        image: &GrayImage,
        lang_tag: &str,
        mode: SegmentationMode,
        opts: &RecognizeOptions,
    ) -> Result<RecognitionResult, Error> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| Error::EngineUnavailable(Box::new(e)))?;

        let mut cmd = Command::new(&self.binary);
        cmd.args(["stdin", "stdout"])
            .args(["--psm", Self::page_seg_mode(mode), "--oem", "3"])
            .args(["-l", lang_tag])
            .args(["-c", &format!("user_defined_dpi={}", opts.dpi_hint)])
            .args([
                "-c",
                &format!(
                    "preserve_interword_spaces={}",
                    u8::from(opts.preserve_spacing)
                ),
            ]);
        if let Some(dir) = &self.tessdata_dir {
            cmd.args(["--tessdata-dir", dir]);
        }
        cmd.arg("tsv")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        tracing::trace!(language = lang_tag, ?mode, "invoking tesseract");

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::EngineUnavailable(Box::new(e)))?;
        child
            .stdin
            .take()
            .ok_or_else(|| Error::EngineUnavailable(BoxError::from("stdin not piped")))?
            .write_all(&png)
            .map_err(|e| Error::EngineUnavailable(Box::new(e)))?;
        let output = child
            .wait_with_output()
            .map_err(|e| Error::EngineUnavailable(Box::new(e)))?;

        if !output.status.success() {
            return Err(Error::EngineUnavailable(
                format!("tesseract exited with {}", output.status).into(),
            ));
        }

        Ok(tsv::parse(&String::from_utf8_lossy(&output.stdout)))
    }
}
