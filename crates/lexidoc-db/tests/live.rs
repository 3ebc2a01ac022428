//! Live integration tests for lexidoc-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/lexidoc-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use lexidoc_core::lexicon::LexiconEntry;
use lexidoc_db::{
    get_document, insert_document, list_lexicon_entries, replace_document_text, replace_lexicon,
    DbError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_entry(word: &str, positive: i32, negative: i32, seq_num: i64) -> LexiconEntry {
    LexiconEntry {
        word: word.to_string(),
        seq_num,
        word_count: 100,
        word_proportion: 0.001,
        average_proportion: 0.002,
        std_dev: 0.003,
        doc_count: 10,
        negative,
        positive,
        uncertainty: 0,
        litigious: 0,
        strong_modal: 0,
        weak_modal: 0,
        constraining: 0,
        syllables: 2,
        source: "12of12inf".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Section 1: Documents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_and_get_document_round_trip(pool: sqlx::PgPool) {
    let created = insert_document(&pool, "report.pdf", Some("gain and loss"))
        .await
        .expect("insert_document failed");

    assert_eq!(created.name, "report.pdf");
    assert_eq!(created.content.as_deref(), Some("gain and loss"));

    let fetched = get_document(&pool, created.id)
        .await
        .expect("get_document failed")
        .expect("document should exist");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "report.pdf");
    assert_eq!(fetched.content.as_deref(), Some("gain and loss"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_missing_document_returns_none(pool: sqlx::PgPool) {
    let fetched = get_document(&pool, 999_999)
        .await
        .expect("get_document failed");
    assert!(fetched.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_first_occurrence_only(pool: sqlx::PgPool) {
    let doc = insert_document(&pool, "a.pdf", Some("loss here, loss there"))
        .await
        .expect("insert failed");

    let updated = replace_document_text(&pool, doc.id, "loss", "gain", false)
        .await
        .expect("replace failed");

    assert_eq!(updated.content.as_deref(), Some("gain here, loss there"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_all_occurrences(pool: sqlx::PgPool) {
    let doc = insert_document(&pool, "a.pdf", Some("loss here, loss there"))
        .await
        .expect("insert failed");

    let updated = replace_document_text(&pool, doc.id, "loss", "gain", true)
        .await
        .expect("replace failed");

    assert_eq!(updated.content.as_deref(), Some("gain here, gain there"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_is_literal_substring_match(pool: sqlx::PgPool) {
    let doc = insert_document(&pool, "a.pdf", Some("glossary of loss"))
        .await
        .expect("insert failed");

    let updated = replace_document_text(&pool, doc.id, "loss", "gain", true)
        .await
        .expect("replace failed");

    // Partial-word matches are replaced too.
    assert_eq!(updated.content.as_deref(), Some("ggainary of gain"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_with_no_match_leaves_content_unchanged(pool: sqlx::PgPool) {
    let doc = insert_document(&pool, "a.pdf", Some("steady state"))
        .await
        .expect("insert failed");

    let updated = replace_document_text(&pool, doc.id, "absent", "present", true)
        .await
        .expect("replace failed");

    assert_eq!(updated.content.as_deref(), Some("steady state"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_on_missing_document_is_not_found(pool: sqlx::PgPool) {
    let err = replace_document_text(&pool, 999_999, "a", "b", true)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_on_null_content_is_not_found(pool: sqlx::PgPool) {
    let doc = insert_document(&pool, "empty.pdf", None)
        .await
        .expect("insert failed");

    let err = replace_document_text(&pool, doc.id, "a", "b", true)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

// ---------------------------------------------------------------------------
// Section 2: Lexicon
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn empty_lexicon_lists_nothing(pool: sqlx::PgPool) {
    let rows = list_lexicon_entries(&pool)
        .await
        .expect("list_lexicon_entries failed");
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_lexicon_installs_entries_in_seq_order(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("GAIN", 2009, 0, 2),
        make_entry("ABANDON", 0, 2009, 1),
    ];

    let installed = replace_lexicon(&pool, &entries)
        .await
        .expect("replace_lexicon failed");
    assert_eq!(installed, 2);

    let rows = list_lexicon_entries(&pool)
        .await
        .expect("list_lexicon_entries failed");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].word, "ABANDON");
    assert_eq!(rows[0].negative, 2009);
    assert_eq!(rows[1].word, "GAIN");
    assert_eq!(rows[1].positive, 2009);
}

#[sqlx::test(migrations = "../../migrations")]
async fn second_upload_fully_replaces_first(pool: sqlx::PgPool) {
    replace_lexicon(&pool, &[make_entry("OLD", 2009, 0, 1)])
        .await
        .expect("first upload failed");

    replace_lexicon(
        &pool,
        &[
            make_entry("FRESH", 2009, 0, 1),
            make_entry("NEWER", 0, 2009, 2),
        ],
    )
    .await
    .expect("second upload failed");

    let rows = list_lexicon_entries(&pool)
        .await
        .expect("list_lexicon_entries failed");
    let words: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
    assert_eq!(words, vec!["FRESH", "NEWER"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_lexicon_with_empty_set_clears_table(pool: sqlx::PgPool) {
    replace_lexicon(&pool, &[make_entry("OLD", 2009, 0, 1)])
        .await
        .expect("first upload failed");

    let installed = replace_lexicon(&pool, &[]).await.expect("clear failed");
    assert_eq!(installed, 0);

    let rows = list_lexicon_entries(&pool)
        .await
        .expect("list_lexicon_entries failed");
    assert!(rows.is_empty());
}
