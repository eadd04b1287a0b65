//! Multi-pass recognition controller.
//!
//! One cycle: condition the capture once, try every configured segmentation
//! mode with the primary language, maybe stop early, maybe retry with the
//! secondary language, then hand the winner to the corrector.

use std::sync::Arc;

use image::{DynamicImage, GrayImage};
use kiritori_config::engine::{EngineConfig, LanguageProfile};
use kiritori_types::{Language, OcrOutput, SegmentationMode};

use crate::conditioner;
use crate::correct::Corrector;
use crate::error::Error;
use crate::recognizer::{RecognizeOptions, Recognizer};
use crate::reconstruct;
use crate::repass;
use crate::score::score;
use crate::script;

/// Dense-script fraction a candidate needs before early accept applies.
const EARLY_ACCEPT_DENSE_RATIO: f32 = 0.6;

/// One fully reconstructed, scoreable text block.
///
/// `mean_confidence` is the mean of the recognition result the text came
/// from; the reconstruction floor is an independent parameter and is not
/// baked into it.
#[derive(Debug, Clone)]
struct Candidate {
    text: String,
    mean_confidence: f32,
    mode: SegmentationMode,
    language: Language,
}

pub struct OcrEngine {
    config: EngineConfig,
    corrector: Corrector,
    recognizer: Arc<dyn Recognizer>,
}

impl OcrEngine {
    pub fn new(
        config: EngineConfig,
        corrector: Corrector,
        recognizer: Arc<dyn Recognizer>,
    ) -> Self {
        Self {
            config,
            corrector,
            recognizer,
        }
    }

    /// Run one recognition cycle: exactly one corrected text out, or a typed
    /// reason why there is none.
    pub fn run(&self, image: &DynamicImage) -> Result<OcrOutput, Error> {
        let conditioned = conditioner::condition(image, self.config.upscale_factor)?;

        let mut best: Option<Candidate> = None;
        self.run_pass(&conditioned, Language::Primary, &mut best);

        if best.as_ref().is_some_and(|c| self.early_accept(c)) {
            tracing::debug!("early accept, skipping secondary pass");
        } else if self.wants_secondary(best.as_ref()) {
            self.run_pass(&conditioned, Language::Secondary, &mut best);
        }

        let best = best.ok_or(Error::NoUsableCandidate)?;
        self.finish(best)
    }

    /// Try every configured segmentation mode with one language profile,
    /// keeping the strictly best candidate. First-seen wins ties.
    fn run_pass(&self, conditioned: &GrayImage, language: Language, best: &mut Option<Candidate>) {
        let profile = self.profile(language);
        let opts = RecognizeOptions {
            dpi_hint: self.config.dpi_hint,
            preserve_spacing: self.config.preserve_spacing,
        };

        for &mode in &self.config.segmentation_modes {
            let result = match self.recognizer.recognize(conditioned, &profile.tag, mode, &opts) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(
                        ?mode,
                        language = %profile.tag,
                        error = %e,
                        "recognition attempt failed, skipping"
                    );
                    continue;
                }
            };

            let mut text = reconstruct::reconstruct_relaxed(
                &result,
                self.config.confidence_floor_strict,
                self.config.confidence_floor_relaxed,
                self.config.min_text_len,
                profile.dense_script,
            );

            if self.config.line_reocr_enabled && !result.is_empty() {
                if let Some(alt) = repass::reocr_low_conf_lines(
                    self.recognizer.as_ref(),
                    conditioned,
                    &result,
                    &profile.tag,
                    self.config.line_reocr_threshold,
                    profile.dense_script,
                    &opts,
                ) {
                    if alt.trim().chars().count() > text.trim().chars().count() {
                        text = alt;
                    }
                }
            }

            let candidate = Candidate {
                text,
                mean_confidence: result.mean_confidence,
                mode,
                language,
            };
            let better = match best.as_ref() {
                None => true,
                Some(current) => {
                    score(&candidate.text, candidate.mean_confidence)
                        > score(&current.text, current.mean_confidence)
                }
            };
            if better {
                *best = Some(candidate);
            }
        }
    }

    fn profile(&self, language: Language) -> &LanguageProfile {
        match language {
            Language::Primary => &self.config.lang_primary,
            Language::Secondary => &self.config.lang_secondary,
        }
    }

    /// A confident, long, dense-script result ends the search immediately.
    fn early_accept(&self, candidate: &Candidate) -> bool {
        candidate.mean_confidence >= self.config.early_accept_confidence
            && candidate.text.trim().chars().count() >= self.config.min_text_len
            && script::dense_ratio(&candidate.text) > EARLY_ACCEPT_DENSE_RATIO
    }

    /// Latin-heavy text suggests the primary language model underperformed.
    fn wants_secondary(&self, best: Option<&Candidate>) -> bool {
        best.is_some_and(|c| {
            script::ascii_ratio(&c.text) > self.config.secondary_trigger_ratio
        })
    }

    fn finish(&self, candidate: Candidate) -> Result<OcrOutput, Error> {
        let text = self.corrector.correct(&candidate.text);
        if text.trim().is_empty() {
            return Err(Error::NoUsableCandidate);
        }
        tracing::debug!(
            mean_confidence = candidate.mean_confidence,
            mode = ?candidate.mode,
            language = ?candidate.language,
            len = text.chars().count(),
            "cycle done"
        );
        Ok(OcrOutput {
            text,
            mean_confidence: candidate.mean_confidence,
            mode: candidate.mode,
            language: candidate.language,
        })
    }
}
