use kiritori_types::SegmentationMode;
use serde::{Deserialize, Serialize};

fn default_floor_strict() -> f32 {
    65.0
}

fn default_floor_relaxed() -> f32 {
    60.0
}

fn default_early_accept() -> f32 {
    86.0
}

fn default_min_text_len() -> usize {
    10
}

fn default_secondary_trigger_ratio() -> f32 {
    0.1
}

fn default_segmentation_modes() -> Vec<SegmentationMode> {
    vec![SegmentationMode::UniformBlock, SegmentationMode::SingleLine]
}

fn default_upscale_factor() -> u32 {
    3
}

fn default_dpi_hint() -> u32 {
    300
}

fn default_preserve_spacing() -> bool {
    true
}

fn default_lang_primary() -> LanguageProfile {
    LanguageProfile {
        tag: "jpn".to_string(),
        dense_script: true,
    }
}

fn default_lang_secondary() -> LanguageProfile {
    LanguageProfile {
        tag: "jpn+eng".to_string(),
        dense_script: true,
    }
}

fn default_line_reocr_threshold() -> f32 {
    70.0
}

/// A recognizer language tag plus how its output should be joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Engine language tag, e.g. "jpn" or "jpn+eng".
    pub tag: String,
    /// Dense scripts have no inter-word spacing; words join without a space.
    pub dense_script: bool,
}

/// Tunables for one recognition cycle. Immutable once the cycle starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-word confidence floor for the first reconstruction pass.
    #[serde(default = "default_floor_strict")]
    pub confidence_floor_strict: f32,
    /// Floor used when the strict pass yields too little text.
    #[serde(default = "default_floor_relaxed")]
    pub confidence_floor_relaxed: f32,
    /// Mean confidence above which a dense, long candidate wins immediately.
    #[serde(default = "default_early_accept")]
    pub early_accept_confidence: f32,
    /// Minimum character count for a reconstruction to count as "enough".
    #[serde(default = "default_min_text_len")]
    pub min_text_len: usize,
    /// ASCII fraction above which the secondary language pass runs.
    #[serde(default = "default_secondary_trigger_ratio")]
    pub secondary_trigger_ratio: f32,
    /// Segmentation modes tried per pass, in order. First-seen wins ties.
    #[serde(default = "default_segmentation_modes")]
    pub segmentation_modes: Vec<SegmentationMode>,
    #[serde(default = "default_upscale_factor")]
    pub upscale_factor: u32,
    #[serde(default = "default_dpi_hint")]
    pub dpi_hint: u32,
    #[serde(default = "default_preserve_spacing")]
    pub preserve_spacing: bool,
    #[serde(default = "default_lang_primary")]
    pub lang_primary: LanguageProfile,
    #[serde(default = "default_lang_secondary")]
    pub lang_secondary: LanguageProfile,
    /// Re-OCR low-confidence lines on cropped sub-images.
    pub line_reocr_enabled: bool,
    /// Line mean confidence below which the re-pass triggers.
    #[serde(default = "default_line_reocr_threshold")]
    pub line_reocr_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_floor_strict: default_floor_strict(),
            confidence_floor_relaxed: default_floor_relaxed(),
            early_accept_confidence: default_early_accept(),
            min_text_len: default_min_text_len(),
            secondary_trigger_ratio: default_secondary_trigger_ratio(),
            segmentation_modes: default_segmentation_modes(),
            upscale_factor: default_upscale_factor(),
            dpi_hint: default_dpi_hint(),
            preserve_spacing: default_preserve_spacing(),
            lang_primary: default_lang_primary(),
            lang_secondary: default_lang_secondary(),
            line_reocr_enabled: false,
            line_reocr_threshold: default_line_reocr_threshold(),
        }
    }
}
