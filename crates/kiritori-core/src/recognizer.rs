use image::GrayImage;
use kiritori_types::{RecognitionResult, SegmentationMode};

use crate::error::Error;

/// Per-invocation engine parameters (not engine-global state).
#[derive(Debug, Clone)]
pub struct RecognizeOptions {
    pub dpi_hint: u32,
    pub preserve_spacing: bool,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            dpi_hint: 300,
            preserve_spacing: true,
        }
    }
}

/// Adapter over the external recognition capability.
///
/// One call wraps exactly one external invocation: no internal retries
/// (retries are the engine's concern). An empty result from the external
/// engine is a successful empty [`RecognitionResult`], not an error; only a
/// hard failure (spawn error, bad exit) is [`Error::EngineUnavailable`].
pub trait Recognizer: Send + Sync {
    fn recognize(
        &self,
        image: &GrayImage,
        lang_tag: &str,
        mode: SegmentationMode,
        opts: &RecognizeOptions,
    ) -> Result<RecognitionResult, Error>;
}
