use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use lexidoc_core::LexiconEntry;
use lexidoc_db::DocumentRow;
use lexidoc_extract::ExtractError;
use lexidoc_sentiment::SentimentError;

use super::{
    map_db_error, map_storage_error, read_file_field, sanitize_filename, ApiError, ApiResponse,
    AppState, ResponseMeta,
};
use crate::middleware::RequestId;

/// A stored document as returned on the wire.
#[derive(Debug, Serialize)]
pub(super) struct DocumentItem {
    pub id: i64,
    pub name: String,
    pub content: Option<String>,
    pub file_url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct FindReplaceRequest {
    old_word: Option<String>,
    new_word: Option<String>,
    #[serde(default)]
    replace_all: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeData {
    positive_words: Vec<String>,
    negative_words: Vec<String>,
    net_positivity_score: f64,
}

fn document_item(row: DocumentRow, public_url: &str) -> DocumentItem {
    let file_url = format!("{}/{}", public_url.trim_end_matches('/'), row.name);
    DocumentItem {
        id: row.id,
        name: row.name,
        content: row.content,
        file_url,
    }
}

fn map_extract_error(request_id: String, error: &ExtractError) -> ApiError {
    match error {
        ExtractError::UnsupportedExtension(ext) => ApiError::new(
            request_id,
            "unsupported_format",
            format!("unsupported file extension: {ext:?}; expected .pdf or .docx"),
        ),
        _ => {
            tracing::warn!(error = %error, "text extraction failed");
            ApiError::new(
                request_id,
                "validation_error",
                "could not extract text from file",
            )
        }
    }
}

pub(super) async fn upload_document(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (filename, bytes) = read_file_field(&mut multipart, &req_id.0).await?;
    let name = sanitize_filename(&filename);

    let content = lexidoc_extract::extract_text(&name, &bytes)
        .map_err(|e| map_extract_error(req_id.0.clone(), &e))?;

    state
        .store
        .put(&name, &bytes)
        .await
        .map_err(|e| map_storage_error(req_id.0.clone(), &e))?;

    let row = lexidoc_db::insert_document(&state.pool, &name, Some(&content))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(id = row.id, file = %row.name, "document uploaded");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: document_item(row, &state.public_url),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(super) async fn get_document(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = lexidoc_db::get_document(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "document not found"))?;

    Ok(Json(ApiResponse {
        data: document_item(row, &state.public_url),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn find_replace(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<FindReplaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let old_word = body.old_word.filter(|w| !w.is_empty());
    let new_word = body.new_word.filter(|w| !w.is_empty());
    let (Some(old_word), Some(new_word)) = (old_word, new_word) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "old_word and new_word are required and must be non-empty",
        ));
    };

    let row =
        lexidoc_db::replace_document_text(&state.pool, id, &old_word, &new_word, body.replace_all)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(id = row.id, replace_all = body.replace_all, "document text replaced");

    Ok(Json(ApiResponse {
        data: document_item(row, &state.public_url),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn analyze_document(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = lexidoc_db::get_document(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "document not found"))?;

    let Some(content) = row.content else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "document has no content to analyze",
        ));
    };

    let entries: Vec<LexiconEntry> = lexidoc_db::list_lexicon_entries(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .into_iter()
        .map(LexiconEntry::from)
        .collect();

    let result = lexidoc_sentiment::analyze(&content, &entries).map_err(|e| {
        let message = match e {
            SentimentError::EmptyContent => "document has no content to analyze",
            SentimentError::NoTokens => "document content produced no tokens",
        };
        ApiError::new(req_id.0.clone(), "validation_error", message)
    })?;

    Ok(Json(ApiResponse {
        data: AnalyzeData {
            positive_words: result.positive_hits,
            negative_words: result.negative_hits,
            net_positivity_score: result.net_positivity_score,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
