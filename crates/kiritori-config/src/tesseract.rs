use serde::{Deserialize, Serialize};

fn default_binary() -> String {
    "tesseract".to_string()
}

/// Where and how to find the external recognition engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Binary name or absolute path.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Pin a tessdata directory instead of the engine default.
    pub tessdata_dir: Option<String>,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            tessdata_dir: None,
        }
    }
}
