//! Rebuilds text from per-word recognizer output under a confidence floor.

use std::collections::BTreeMap;

use kiritori_types::{RecognitionResult, RecognizedWord};

/// Reconstruct text from one recognition result.
///
/// Sentinel rows (confidence < 0) are always dropped, then anything under
/// `floor`. Survivors group by (block, paragraph, line) in ascending key
/// order, sort by word ordinal, and join with no separator for dense scripts
/// or a single space otherwise. Lines left empty are not emitted.
pub fn reconstruct(result: &RecognitionResult, floor: f32, dense_script: bool) -> String {
    let mut lines: BTreeMap<(u32, u32, u32), Vec<&RecognizedWord>> = BTreeMap::new();
    for word in &result.words {
        if !word.is_text() || word.confidence < floor || word.text.trim().is_empty() {
            continue;
        }
        lines.entry(word.line_key()).or_default().push(word);
    }

    let joiner = if dense_script { "" } else { " " };
    let mut out = Vec::with_capacity(lines.len());
    for (_, mut words) in lines {
        words.sort_by_key(|w| w.word);
        let line: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        out.push(line.join(joiner));
    }
    normalize_ws(&out.join("\n"))
}

/// Two-pass floor relaxation: reconstruct at the strict floor, and when the
/// result is shorter than `min_len` characters, reconstruct once more at the
/// relaxed floor. The recognizer is never re-invoked here.
pub fn reconstruct_relaxed(
    result: &RecognitionResult,
    strict_floor: f32,
    relaxed_floor: f32,
    min_len: usize,
    dense_script: bool,
) -> String {
    let text = reconstruct(result, strict_floor, dense_script);
    if text.trim().chars().count() < min_len {
        return reconstruct(result, relaxed_floor, dense_script);
    }
    text
}

/// Trim every line, then collapse runs of 3+ newlines down to 2.
///
/// Trimming first keeps this idempotent: a second application sees no
/// whitespace-only lines that could merge into a longer newline run.
pub fn normalize_ws(text: &str) -> String {
    let trimmed: Vec<&str> = text.lines().map(str::trim).collect();
    let joined = trimmed.join("\n");

    let mut out = String::with_capacity(joined.len());
    let mut newlines = 0usize;
    for c in joined.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(c);
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }
    out
}
