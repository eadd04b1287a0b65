//! Character classification for Japanese-heavy captures.

/// Hiragana, katakana, or the prolonged sound mark.
pub fn is_kana(c: char) -> bool {
    matches!(c, 'ぁ'..='ん' | 'ァ'..='ヶ' | 'ー')
}

/// CJK ideographs plus the iteration/counter marks that behave like them.
pub fn is_ideograph(c: char) -> bool {
    matches!(c, '一'..='龥' | '々' | '〆' | 'ヵ' | 'ヶ')
}

fn is_dense(c: char) -> bool {
    matches!(c, 'ぁ'..='ん' | 'ァ'..='ヶ' | '一'..='龥')
}

/// Fraction of characters in the dense (non-space-delimited) script ranges.
pub fn dense_ratio(text: &str) -> f32 {
    let mut total = 0usize;
    let mut dense = 0usize;
    for c in text.chars() {
        total += 1;
        if is_dense(c) {
            dense += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        dense as f32 / total as f32
    }
}

/// Fraction of ASCII characters, used to decide whether the capture is
/// Latin-heavy enough to warrant the secondary language pass.
pub fn ascii_ratio(text: &str) -> f32 {
    let mut total = 0usize;
    let mut ascii = 0usize;
    for c in text.chars() {
        total += 1;
        if c.is_ascii() {
            ascii += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        ascii as f32 / total as f32
    }
}
