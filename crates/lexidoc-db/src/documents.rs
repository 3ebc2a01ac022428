//! Database operations for the `documents` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `documents` table.
///
/// `content` is NULL until extraction has produced text for the document.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: i64,
    pub name: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a new document and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_document(
    pool: &PgPool,
    name: &str,
    content: Option<&str>,
) -> Result<DocumentRow, DbError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        "INSERT INTO documents (name, content) \
         VALUES ($1, $2) \
         RETURNING id, name, content, created_at, updated_at",
    )
    .bind(name)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetch a document by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_document(pool: &PgPool, id: i64) -> Result<Option<DocumentRow>, DbError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, name, content, created_at, updated_at \
         FROM documents \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Replace occurrences of `old` with `new` in a document's content.
///
/// Replacement is a literal substring match; `replace_all` decides whether
/// every occurrence changes or only the first. The row is locked for the
/// duration of the transaction so two concurrent replacements cannot
/// interleave their read-modify-write cycles.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when no document with `id` exists or its
/// content is NULL, or [`DbError::Sqlx`] if the transaction fails.
pub async fn replace_document_text(
    pool: &PgPool,
    id: i64,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Result<DocumentRow, DbError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, name, content, created_at, updated_at \
         FROM documents \
         WHERE id = $1 \
         FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(DbError::NotFound)?;

    let content = row.content.as_deref().ok_or(DbError::NotFound)?;

    let updated = if replace_all {
        content.replace(old, new)
    } else {
        content.replacen(old, new, 1)
    };

    let row = sqlx::query_as::<_, DocumentRow>(
        "UPDATE documents \
         SET content = $1, updated_at = now() \
         WHERE id = $2 \
         RETURNING id, name, content, created_at, updated_at",
    )
    .bind(&updated)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}
