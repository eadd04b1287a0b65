//! Optional re-read of low-confidence lines on cropped sub-images.
//!
//! Strictly an accuracy/cost trade-off; off by default.

use std::collections::BTreeMap;

use image::imageops;
use image::GrayImage;
use kiritori_types::{RecognitionResult, RecognizedWord, SegmentationMode};

use crate::recognizer::{RecognizeOptions, Recognizer};
use crate::reconstruct::{normalize_ws, reconstruct};

/// Rebuild the text with every line under `threshold` mean confidence
/// re-read from its cropped region of the conditioned image.
///
/// A line's re-read replaces it only when non-empty and at least as long as
/// the original line text; anything else keeps the original. Returns `None`
/// when there are no text rows to work with.
pub fn reocr_low_conf_lines(
    recognizer: &dyn Recognizer,
    conditioned: &GrayImage,
    result: &RecognitionResult,
    lang_tag: &str,
    threshold: f32,
    dense_script: bool,
    opts: &RecognizeOptions,
) -> Option<String> {
    let mut lines: BTreeMap<(u32, u32, u32), Vec<&RecognizedWord>> = BTreeMap::new();
    for word in result.words.iter().filter(|w| w.is_text()) {
        if word.text.trim().is_empty() {
            continue;
        }
        lines.entry(word.line_key()).or_default().push(word);
    }
    if lines.is_empty() {
        return None;
    }

    let joiner = if dense_script { "" } else { " " };
    let mut out = Vec::with_capacity(lines.len());
    for (key, mut words) in lines {
        words.sort_by_key(|w| w.word);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        let original = texts.join(joiner);

        let mean_conf =
            words.iter().map(|w| w.confidence).sum::<f32>() / words.len() as f32;
        if mean_conf >= threshold {
            out.push(original);
            continue;
        }

        match reread_line(recognizer, conditioned, &words, lang_tag, dense_script, opts) {
            Some(reread)
                if !reread.trim().is_empty()
                    && reread.chars().count() >= original.chars().count() =>
            {
                tracing::debug!(?key, "line replaced by re-pass");
                out.push(reread);
            }
            _ => out.push(original),
        }
    }
    Some(normalize_ws(&out.join("\n")))
}

fn reread_line(
    recognizer: &dyn Recognizer,
    conditioned: &GrayImage,
    words: &[&RecognizedWord],
    lang_tag: &str,
    dense_script: bool,
    opts: &RecognizeOptions,
) -> Option<String> {
    let left = words.iter().map(|w| w.bounds.left).min()?;
    let top = words.iter().map(|w| w.bounds.top).min()?;
    let right = words.iter().map(|w| w.bounds.right()).max()?;
    let bottom = words.iter().map(|w| w.bounds.bottom()).max()?;

    let right = right.min(conditioned.width());
    let bottom = bottom.min(conditioned.height());
    if right <= left || bottom <= top {
        return None;
    }

    let crop =
        imageops::crop_imm(conditioned, left, top, right - left, bottom - top).to_image();
    match recognizer.recognize(&crop, lang_tag, SegmentationMode::SingleLine, opts) {
        Ok(reread) => Some(reconstruct(&reread, 0.0, dense_script)),
        Err(e) => {
            tracing::warn!(error = %e, "line re-pass failed, keeping original");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use kiritori_types::BoundingBox;

    struct FixedRecognizer {
        reply: Vec<RecognizedWord>,
    }

    impl Recognizer for FixedRecognizer {
        fn recognize(
            &self,
            _image: &GrayImage,
            _lang_tag: &str,
            mode: SegmentationMode,
            _opts: &RecognizeOptions,
        ) -> Result<RecognitionResult, Error> {
            assert_eq!(mode, SegmentationMode::SingleLine);
            Ok(RecognitionResult::from_words(self.reply.clone()))
        }
    }

    fn word(text: &str, conf: f32, line: u32, ordinal: u32) -> RecognizedWord {
        RecognizedWord {
            text: text.to_string(),
            confidence: conf,
            block: 0,
            paragraph: 0,
            line,
            word: ordinal,
            bounds: BoundingBox {
                left: ordinal * 20,
                top: line * 30,
                width: 18,
                height: 24,
            },
        }
    }

    fn blank_image() -> GrayImage {
        GrayImage::from_pixel(200, 200, image::Luma([255]))
    }

    #[test]
    fn test_confident_lines_untouched() {
        let recognizer = FixedRecognizer {
            reply: vec![word("置換", 99.0, 0, 0)],
        };
        let result = RecognitionResult::from_words(vec![word("良い行", 95.0, 0, 0)]);
        let out = reocr_low_conf_lines(
            &recognizer,
            &blank_image(),
            &result,
            "jpn",
            70.0,
            true,
            &RecognizeOptions::default(),
        );
        assert_eq!(out.as_deref(), Some("良い行"));
    }

    #[test]
    fn test_low_conf_line_replaced_by_longer_reread() {
        let recognizer = FixedRecognizer {
            reply: vec![word("良い読み", 90.0, 0, 0)],
        };
        let result = RecognitionResult::from_words(vec![word("誤読", 40.0, 0, 0)]);
        let out = reocr_low_conf_lines(
            &recognizer,
            &blank_image(),
            &result,
            "jpn",
            70.0,
            true,
            &RecognizeOptions::default(),
        );
        assert_eq!(out.as_deref(), Some("良い読み"));
    }

    #[test]
    fn test_shorter_reread_rejected() {
        let recognizer = FixedRecognizer {
            reply: vec![word("短", 90.0, 0, 0)],
        };
        let result = RecognitionResult::from_words(vec![word("元の行", 40.0, 0, 0)]);
        let out = reocr_low_conf_lines(
            &recognizer,
            &blank_image(),
            &result,
            "jpn",
            70.0,
            true,
            &RecognizeOptions::default(),
        );
        assert_eq!(out.as_deref(), Some("元の行"));
    }

    #[test]
    fn test_empty_reread_rejected() {
        let recognizer = FixedRecognizer { reply: vec![] };
        let result = RecognitionResult::from_words(vec![word("元の行", 40.0, 0, 0)]);
        let out = reocr_low_conf_lines(
            &recognizer,
            &blank_image(),
            &result,
            "jpn",
            70.0,
            true,
            &RecognizeOptions::default(),
        );
        assert_eq!(out.as_deref(), Some("元の行"));
    }

    #[test]
    fn test_no_text_rows_yields_none() {
        let recognizer = FixedRecognizer { reply: vec![] };
        let result = RecognitionResult::from_words(vec![word("", -1.0, 0, 0)]);
        let out = reocr_low_conf_lines(
            &recognizer,
            &blank_image(),
            &result,
            "jpn",
            70.0,
            true,
            &RecognizeOptions::default(),
        );
        assert!(out.is_none());
    }
}
