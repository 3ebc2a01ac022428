use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension,
};

use super::{map_storage_error, sanitize_filename, ApiError, AppState};
use crate::middleware::RequestId;

/// Serve the original uploaded bytes back to the client.
pub(super) async fn download_file(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let name = sanitize_filename(&filename);

    let bytes = state
        .store
        .get(&name)
        .await
        .map_err(|e| map_storage_error(req_id.0, &e))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{name}\""),
            ),
        ],
        bytes,
    ))
}
