//! Document scoring against the sentiment lexicon.

use std::collections::HashSet;

use lexidoc_core::lexicon::LexiconEntry;

use crate::error::SentimentError;
use crate::tokenizer::tokenize;
use crate::types::AnalysisResult;

/// Score a document's text against the lexicon.
///
/// Category membership is a nonzero flag on the entry; a word flagged both
/// positive and negative lands in both hit lists. Matching is exact on the
/// lowercased token, and every occurrence counts, so repeated words weigh in
/// repeatedly. The score is `(positive - negative) / total_tokens`.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyContent`] when `content` is empty and
/// [`SentimentError::NoTokens`] when tokenization produces nothing to score,
/// which would otherwise divide by zero.
pub fn analyze(content: &str, lexicon: &[LexiconEntry]) -> Result<AnalysisResult, SentimentError> {
    if content.is_empty() {
        return Err(SentimentError::EmptyContent);
    }

    let tokens = tokenize(content);
    if tokens.is_empty() {
        return Err(SentimentError::NoTokens);
    }

    let positive_words: HashSet<String> = category_words(lexicon, |e| e.positive);
    let negative_words: HashSet<String> = category_words(lexicon, |e| e.negative);

    let positive_hits: Vec<String> = tokens
        .iter()
        .filter(|t| positive_words.contains(t.as_str()))
        .cloned()
        .collect();
    let negative_hits: Vec<String> = tokens
        .iter()
        .filter(|t| negative_words.contains(t.as_str()))
        .cloned()
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let net_positivity_score = (positive_hits.len() as f64 - negative_hits.len() as f64)
        / tokens.len() as f64;

    Ok(AnalysisResult {
        positive_hits,
        negative_hits,
        net_positivity_score,
    })
}

fn category_words<F>(lexicon: &[LexiconEntry], flag: F) -> HashSet<String>
where
    F: Fn(&LexiconEntry) -> i32,
{
    lexicon
        .iter()
        .filter(|e| flag(e) != 0)
        .map(|e| e.word.to_lowercase())
        .collect()
}
