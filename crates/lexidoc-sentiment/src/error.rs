use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SentimentError {
    #[error("document content is empty")]
    EmptyContent,

    #[error("document content produced no tokens")]
    NoTokens,
}
