//! Parser for Tesseract's TSV output.
//!
//! Columns: level page block par line word left top width height conf text.
//! Structural rows (level < 5) carry conf -1 and an empty text column; they
//! are kept as sentinel rows and filtered downstream.

use kiritori_types::{BoundingBox, RecognitionResult, RecognizedWord};

pub(crate) fn parse(tsv: &str) -> RecognitionResult {
    let mut words = Vec::new();
    for line in tsv.lines().skip(1) {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }
        let Some(word) = parse_row(&cols) else {
            tracing::trace!(row = line, "skipping malformed tsv row");
            continue;
        };
        words.push(word);
    }
    RecognitionResult::from_words(words)
}

fn parse_row(cols: &[&str]) -> Option<RecognizedWord> {
    let block = cols[2].parse().ok()?;
    let paragraph = cols[3].parse().ok()?;
    let line = cols[4].parse().ok()?;
    let word = cols[5].parse().ok()?;
    let left = cols[6].parse().ok()?;
    let top = cols[7].parse().ok()?;
    let width = cols[8].parse().ok()?;
    let height = cols[9].parse().ok()?;
    let confidence: f32 = cols[10].parse().ok()?;
    // Rare, but the text itself may contain a tab.
    let text = cols[11..].join("\t");

    Some(RecognizedWord {
        text,
        confidence,
        block,
        paragraph,
        line,
        word,
        bounds: BoundingBox {
            left,
            top,
            width,
            height,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn test_parse_word_rows() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t300\t60\t-1\t\n\
             5\t1\t1\t1\t1\t1\t12\t8\t40\t24\t91.5\tあ\n\
             5\t1\t1\t1\t1\t2\t54\t8\t40\t24\t88.5\tい\n"
        );
        let result = parse(&tsv);
        assert_eq!(result.words.len(), 3);
        assert_eq!(result.words[1].text, "あ");
        assert_eq!(result.words[1].word, 1);
        assert_eq!(result.words[1].bounds.left, 12);
        // Mean over the two text rows only.
        assert!((result.mean_confidence - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_sentinel_rows_kept_with_negative_confidence() {
        let tsv = format!("{HEADER}\n4\t1\t1\t1\t1\t0\t10\t10\t100\t30\t-1\t\n");
        let result = parse(&tsv);
        assert_eq!(result.words.len(), 1);
        assert!(!result.words[0].is_text());
        assert_eq!(result.mean_confidence, 0.0);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse("").is_empty());
        assert!(parse(HEADER).is_empty());
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let tsv = format!(
            "{HEADER}\n\
             not a row\n\
             5\t1\tx\t1\t1\t1\t12\t8\t40\t24\t91.5\tあ\n\
             5\t1\t1\t1\t1\t1\t12\t8\t40\t24\t91.5\tあ\n"
        );
        let result = parse(&tsv);
        assert_eq!(result.words.len(), 1);
    }

    #[test]
    fn test_text_with_embedded_tab_rejoined() {
        let tsv = format!("{HEADER}\n5\t1\t1\t1\t1\t1\t12\t8\t40\t24\t80\ta\tb\n");
        let result = parse(&tsv);
        assert_eq!(result.words[0].text, "a\tb");
    }
}
