use serde::{Deserialize, Serialize};

/// Which language profile produced a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Primary,
    Secondary,
}

/// How the recognizer partitions the image into blocks/lines before reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Treat the whole image as one uniform block of text.
    UniformBlock,
    /// Treat the whole image as a single text line.
    SingleLine,
}

/// Word bounding box in conditioned-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// One row of recognizer output.
///
/// Structural rows (page/block/paragraph markers) carry confidence -1.0 and
/// must be filtered before any text use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedWord {
    pub text: String,
    /// Recognition confidence in [-1, 100]; -1.0 marks a non-text row.
    pub confidence: f32,
    pub block: u32,
    pub paragraph: u32,
    pub line: u32,
    /// Within-line ordering.
    pub word: u32,
    pub bounds: BoundingBox,
}

impl RecognizedWord {
    /// Whether this row is an actual text element (not a layout sentinel).
    pub fn is_text(&self) -> bool {
        self.confidence >= 0.0
    }

    /// Composite layout key used for line grouping.
    pub fn line_key(&self) -> (u32, u32, u32) {
        (self.block, self.paragraph, self.line)
    }
}

/// Full ordered output of one recognizer invocation.
#[derive(Debug, Clone, Default)]
pub struct RecognitionResult {
    pub words: Vec<RecognizedWord>,
    /// Mean confidence over text rows only; 0.0 when there are none.
    pub mean_confidence: f32,
}

impl RecognitionResult {
    pub fn from_words(words: Vec<RecognizedWord>) -> Self {
        let (sum, count) = words
            .iter()
            .filter(|w| w.is_text())
            .fold((0.0f32, 0usize), |(s, n), w| (s + w.confidence, n + 1));
        let mean_confidence = if count == 0 { 0.0 } else { sum / count as f32 };
        Self {
            words,
            mean_confidence,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Final corrected text of one recognition cycle, with selection metadata.
#[derive(Debug, Clone, Serialize)]
pub struct OcrOutput {
    pub text: String,
    pub mean_confidence: f32,
    pub mode: SegmentationMode,
    pub language: Language,
}

impl OcrOutput {
    /// Character length of the corrected text.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
