//! Lexicon-based sentiment scoring for lexidoc.
//!
//! Tokenizes stored document text and matches tokens against the current
//! sentiment lexicon's positive and negative categories, producing ordered
//! hit lists and a net positivity score. Pure computation; no I/O and no
//! caching — every call recomputes from its inputs.

pub mod error;
pub mod scorer;
pub mod tokenizer;
pub mod types;

pub use error::SentimentError;
pub use scorer::analyze;
pub use tokenizer::tokenize;
pub use types::AnalysisResult;
