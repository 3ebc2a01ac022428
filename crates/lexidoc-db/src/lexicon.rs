//! Database operations for the `lexicon_entries` table.
//!
//! The table holds exactly one lexicon generation at a time. An upload swaps
//! the whole table inside a single transaction, so readers observe either the
//! previous generation or the new one, never a mix.

use chrono::{DateTime, Utc};
use lexidoc_core::lexicon::LexiconEntry;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `lexicon_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LexiconRow {
    pub id: i64,
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
    pub created_at: DateTime<Utc>,
}

impl From<LexiconRow> for LexiconEntry {
    fn from(row: LexiconRow) -> Self {
        Self {
            word: row.word,
            seq_num: row.seq_num,
            word_count: row.word_count,
            word_proportion: row.word_proportion,
            average_proportion: row.average_proportion,
            std_dev: row.std_dev,
            doc_count: row.doc_count,
            negative: row.negative,
            positive: row.positive,
            uncertainty: row.uncertainty,
            litigious: row.litigious,
            strong_modal: row.strong_modal,
            weak_modal: row.weak_modal,
            constraining: row.constraining,
            syllables: row.syllables,
            source: row.source,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Replace the entire lexicon with `entries` in one transaction.
///
/// Returns the number of entries installed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction fails; the previous
/// generation stays in place in that case.
pub async fn replace_lexicon(pool: &PgPool, entries: &[LexiconEntry]) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM lexicon_entries")
        .execute(&mut *tx)
        .await?;

    for entry in entries {
        sqlx::query(
            "INSERT INTO lexicon_entries \
                 (word, seq_num, word_count, word_proportion, average_proportion, std_dev, \
                  doc_count, negative, positive, uncertainty, litigious, strong_modal, \
                  weak_modal, constraining, syllables, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(&entry.word)
        .bind(entry.seq_num)
        .bind(entry.word_count)
        .bind(entry.word_proportion)
        .bind(entry.average_proportion)
        .bind(entry.std_dev)
        .bind(entry.doc_count)
        .bind(entry.negative)
        .bind(entry.positive)
        .bind(entry.uncertainty)
        .bind(entry.litigious)
        .bind(entry.strong_modal)
        .bind(entry.weak_modal)
        .bind(entry.constraining)
        .bind(entry.syllables)
        .bind(&entry.source)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(entries.len() as u64)
}

/// Return the current lexicon generation in full.
///
/// Results are ordered by `seq_num` then `id` so repeated reads are stable.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_lexicon_entries(pool: &PgPool) -> Result<Vec<LexiconRow>, DbError> {
    let rows = sqlx::query_as::<_, LexiconRow>(
        "SELECT id, word, seq_num, word_count, word_proportion, average_proportion, std_dev, \
                doc_count, negative, positive, uncertainty, litigious, strong_modal, \
                weak_modal, constraining, syllables, source, created_at \
         FROM lexicon_entries \
         ORDER BY seq_num, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
