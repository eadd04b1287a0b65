//! Deterministic post-hoc cleanup of the winning candidate.
//!
//! Each rule is a character-wise pass whose output no longer matches its own
//! trigger, which makes the whole corrector idempotent.

use kiritori_config::corrections::CorrectionsConfig;

use crate::reconstruct::normalize_ws;
use crate::script;

/// Symbols that collapse when repeated (misreads love doubling these).
const REPEATABLE_SYMBOLS: &[char] = &['=', '、', '。', '．', '…', '！', '？'];

/// Closing punctuation that should not be preceded by whitespace.
const CLOSERS: &[char] = &['、', '。', '．', '，', '）', ')'];

/// Opening brackets that should not be followed by whitespace.
const OPENERS: &[char] = &['（', '('];

pub struct Corrector {
    literal_fixes: Vec<(String, String)>,
}

impl Corrector {
    pub fn new(config: &CorrectionsConfig) -> Self {
        Self {
            literal_fixes: config
                .literal_fixes
                .iter()
                .map(|f| (f.pattern.clone(), f.replacement.clone()))
                .collect(),
        }
    }

    /// Apply all correction rules in order, finishing with whitespace
    /// normalization. Applied exactly once, to the winning candidate only.
    pub fn correct(&self, text: &str) -> String {
        let text = drop_sandwiched_ideograph(text);
        let text = self.apply_literal_fixes(text);
        let text = collapse_repeated_symbols(&text);
        let text = tighten_punctuation(&text);
        normalize_ws(&text)
    }

    fn apply_literal_fixes(&self, mut text: String) -> String {
        for (pattern, replacement) in &self.literal_fixes {
            text = text.replace(pattern, replacement);
        }
        text
    }
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new(&CorrectionsConfig::default())
    }
}

/// Remove a single ideograph sandwiched directly between two kana.
///
/// A lone kanji inside a purely kana word is a common misread of a small
/// glyph. Neighbors are judged on the input text, so two ideographs in a row
/// are both kept.
fn drop_sandwiched_ideograph(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        let sandwiched = i > 0
            && i + 1 < chars.len()
            && script::is_ideograph(c)
            && script::is_kana(chars[i - 1])
            && script::is_kana(chars[i + 1]);
        if !sandwiched {
            out.push(c);
        }
    }
    out
}

/// Collapse runs of 2+ identical repeatable symbols to one occurrence.
fn collapse_repeated_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if prev == Some(c) && REPEATABLE_SYMBOLS.contains(&c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Drop whitespace before closing punctuation and after opening brackets.
fn tighten_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_ws = String::new();
    let mut after_opener = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !after_opener {
                pending_ws.push(c);
            }
            continue;
        }
        if CLOSERS.contains(&c) {
            pending_ws.clear();
        }
        if !pending_ws.is_empty() {
            out.push_str(&pending_ws);
            pending_ws.clear();
        }
        out.push(c);
        after_opener = OPENERS.contains(&c);
    }
    out.push_str(&pending_ws);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiritori_config::LiteralFix;

    #[test]
    fn test_sandwiched_ideograph_removed() {
        let c = Corrector::default();
        assert_eq!(c.correct("しか本い"), "しかい");
    }

    #[test]
    fn test_adjacent_ideographs_kept() {
        // Two kanji in a row are a real word, not a stray glyph.
        let c = Corrector::default();
        assert_eq!(c.correct("か漢字こ"), "か漢字こ");
    }

    #[test]
    fn test_ideograph_at_edges_kept() {
        let c = Corrector::default();
        assert_eq!(c.correct("本です"), "本です");
        assert_eq!(c.correct("読む本"), "読む本");
    }

    #[test]
    fn test_literal_fix_applied() {
        let c = Corrector::default();
        assert_eq!(c.correct("ここで和複製する"), "ここで複製する");
    }

    #[test]
    fn test_custom_literal_fixes_ordered() {
        let config = CorrectionsConfig {
            literal_fixes: vec![LiteralFix::new("ab", "b"), LiteralFix::new("bb", "b")],
        };
        let c = Corrector::new(&config);
        assert_eq!(c.correct("abb"), "b");
    }

    #[test]
    fn test_repeated_symbols_collapsed() {
        let c = Corrector::default();
        assert_eq!(c.correct("！！！"), "！");
        assert_eq!(c.correct("終わり。。。"), "終わり。");
        assert_eq!(c.correct("a==b"), "a=b");
    }

    #[test]
    fn test_distinct_symbols_not_collapsed() {
        let c = Corrector::default();
        assert_eq!(c.correct("。、"), "。、");
    }

    #[test]
    fn test_space_before_closer_removed() {
        let c = Corrector::default();
        assert_eq!(c.correct("はい 。"), "はい。");
        assert_eq!(c.correct("(a )"), "(a)");
    }

    #[test]
    fn test_space_after_opener_removed() {
        let c = Corrector::default();
        assert_eq!(c.correct("（ 注"), "（注");
    }

    #[test]
    fn test_ordinary_spaces_kept() {
        let c = Corrector::default();
        assert_eq!(c.correct("Hello World"), "Hello World");
    }

    #[test]
    fn test_idempotent() {
        let c = Corrector::default();
        let cases = [
            "しか本い！！！",
            "ここで和複製します 。",
            "（ メモ ）\n\n\n\nおわり。。。",
            "Hello  World",
            "あ一い二う",
            "",
        ];
        for case in cases {
            let once = c.correct(case);
            assert_eq!(c.correct(&once), once, "input: {case:?}");
        }
    }
}
