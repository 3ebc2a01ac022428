use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;

use super::{
    map_db_error, map_storage_error, read_file_field, sanitize_filename, ApiError, ApiResponse,
    AppState, ResponseMeta,
};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct LexiconUploadData {
    pub entries_loaded: u64,
}

pub(super) async fn upload_lexicon(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (filename, bytes) = read_file_field(&mut multipart, &req_id.0).await?;
    let name = sanitize_filename(&filename);

    if !name.to_lowercase().ends_with(".csv") {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "lexicon upload must be a .csv file",
        ));
    }

    let entries = lexidoc_core::parse_lexicon_csv(&bytes)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    state
        .store
        .put(&name, &bytes)
        .await
        .map_err(|e| map_storage_error(req_id.0.clone(), &e))?;

    let entries_loaded = lexidoc_db::replace_lexicon(&state.pool, &entries)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(entries = entries_loaded, file = %name, "lexicon replaced");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: LexiconUploadData { entries_loaded },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
