//! Sentiment lexicon record and CSV ingestion.
//!
//! The lexicon arrives as a CSV in the Loughran-McDonald master dictionary
//! layout: one row per word, integer category flags (nonzero = word belongs
//! to the category), and carried-through statistics columns. Parsing is
//! strict about identity (`Word` must be present for every row) and lenient
//! about numbers (absent or unparseable cells coerce to 0).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no Word column")]
    MissingWordColumn,

    #[error("row {row} has an empty Word field")]
    MissingWord { row: usize },
}

/// One word of the sentiment lexicon.
///
/// Category flags are integers, not booleans: the source dictionary stores
/// the year a word entered the category, so any nonzero value counts as
/// membership. The statistics fields are metadata carried through from the
/// upload; nothing downstream computes with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub seq_num: i64,
    pub word_count: i64,
    pub word_proportion: f64,
    pub average_proportion: f64,
    pub std_dev: f64,
    pub doc_count: i64,
    pub negative: i32,
    pub positive: i32,
    pub uncertainty: i32,
    pub litigious: i32,
    pub strong_modal: i32,
    pub weak_modal: i32,
    pub constraining: i32,
    pub syllables: i32,
    pub source: String,
}

const DEFAULT_SOURCE: &str = "12of12inf";

/// Parse a lexicon CSV into entries.
///
/// Header names are matched case-insensitively with spaces treated as
/// underscores, so both `Word Count` and `Word_Count` resolve. Unknown
/// columns are ignored. A row with a missing or empty `Word` cell fails the
/// whole load; numeric cells that fail to parse (including NaN) coerce to 0.
///
/// # Errors
///
/// Returns [`LexiconError::MissingWordColumn`] when no `Word` header exists,
/// [`LexiconError::MissingWord`] for a row without a word (`row` is the
/// 1-based line number including the header), or [`LexiconError::Csv`] when
/// the reader itself fails.
pub fn parse_lexicon_csv(bytes: &[u8]) -> Result<Vec<LexiconEntry>, LexiconError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    let word_col = *columns
        .get("word")
        .ok_or(LexiconError::MissingWordColumn)?;

    let mut entries = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1; the first data row is line 2.
        let row = i + 2;

        let word = record.get(word_col).map(str::trim).unwrap_or_default();
        if word.is_empty() {
            return Err(LexiconError::MissingWord { row });
        }

        entries.push(LexiconEntry {
            word: word.to_string(),
            seq_num: int_field(&record, &columns, "seq_num"),
            word_count: int_field(&record, &columns, "word_count"),
            word_proportion: float_field(&record, &columns, "word_proportion"),
            average_proportion: float_field(&record, &columns, "average_proportion"),
            std_dev: float_field(&record, &columns, "std_dev"),
            doc_count: int_field(&record, &columns, "doc_count"),
            negative: flag_field(&record, &columns, "negative"),
            positive: flag_field(&record, &columns, "positive"),
            uncertainty: flag_field(&record, &columns, "uncertainty"),
            litigious: flag_field(&record, &columns, "litigious"),
            strong_modal: flag_field(&record, &columns, "strong_modal"),
            weak_modal: flag_field(&record, &columns, "weak_modal"),
            constraining: flag_field(&record, &columns, "constraining"),
            syllables: flag_field(&record, &columns, "syllables"),
            source: text_field(&record, &columns, "source", DEFAULT_SOURCE),
        });
    }

    Ok(entries)
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn raw_field<'r>(
    record: &'r csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn int_field(record: &csv::StringRecord, columns: &HashMap<String, usize>, name: &str) -> i64 {
    raw_field(record, columns, name)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

fn flag_field(record: &csv::StringRecord, columns: &HashMap<String, usize>, name: &str) -> i32 {
    raw_field(record, columns, name)
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(0)
}

fn float_field(record: &csv::StringRecord, columns: &HashMap<String, usize>, name: &str) -> f64 {
    // "NaN" parses successfully as f64::NAN; the fill-default policy wants 0.
    raw_field(record, columns, name)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn text_field(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
    default: &str,
) -> String {
    raw_field(record, columns, name)
        .unwrap_or(default)
        .to_string()
}
