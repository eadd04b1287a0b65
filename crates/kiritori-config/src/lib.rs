use std::env;

use serde::{Deserialize, Serialize};

use self::corrections::CorrectionsConfig;
use self::engine::EngineConfig;
use self::tesseract::TesseractConfig;

pub mod corrections;
pub mod engine;
pub mod tesseract;

pub use corrections::LiteralFix;
pub use engine::LanguageProfile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub tesseract: TesseractConfig,
    pub corrections: CorrectionsConfig,
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Overlay settings from the process environment.
    pub fn apply_env(&mut self) {
        if let Ok(cmd) = env::var("TESSERACT_CMD") {
            self.tesseract.binary = cmd;
        }
        if let Ok(dir) = env::var("TESSDATA_DIR") {
            self.tesseract.tessdata_dir = Some(dir);
        }
        if let Ok(tag) = env::var("OCR_LANG_PRIMARY") {
            self.engine.lang_primary.tag = tag;
        }
        if let Ok(tag) = env::var("OCR_LANG_SECONDARY") {
            self.engine.lang_secondary.tag = tag;
        }
        if let Some(enabled) = env::var("OCR_LINE_REOCR")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.engine.line_reocr_enabled = enabled;
        }
        if let Some(dpi) = env::var("OCR_DPI").ok().and_then(|v| v.parse().ok()) {
            self.engine.dpi_hint = dpi;
        }
    }
}
