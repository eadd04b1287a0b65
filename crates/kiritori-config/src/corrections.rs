use serde::{Deserialize, Serialize};

/// One exact literal substitution for a recurring known misread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralFix {
    pub pattern: String,
    pub replacement: String,
}

impl LiteralFix {
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Correction dictionary applied after the structural heuristics.
///
/// Entries are ordered; later entries see earlier replacements. The default
/// list carries fixes for misreads that showed up repeatedly in practice and
/// is meant to be edited, not treated as canonical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionsConfig {
    pub literal_fixes: Vec<LiteralFix>,
}

impl Default for CorrectionsConfig {
    fn default() -> Self {
        Self {
            literal_fixes: vec![LiteralFix::new("で和複製", "で複製")],
        }
    }
}
