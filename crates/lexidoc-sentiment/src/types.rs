use serde::Serialize;

/// Outcome of scoring one document against the lexicon.
///
/// Hit lists preserve document order and count every occurrence, so a word
/// that appears three times contributes three entries. The score is the
/// difference between positive and negative hit counts divided by the total
/// token count, landing in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub positive_hits: Vec<String>,
    pub negative_hits: Vec<String>,
    pub net_positivity_score: f64,
}
