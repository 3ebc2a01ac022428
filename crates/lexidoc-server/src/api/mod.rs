mod documents;
mod files;
mod lexicon;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use lexidoc_storage::{ObjectStore, StorageError};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub store: Arc<dyn ObjectStore>,
    pub public_url: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" | "unsupported_format" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &lexidoc_db::DbError) -> ApiError {
    match error {
        lexidoc_db::DbError::NotFound => {
            ApiError::new(request_id, "not_found", "document not found")
        }
        _ => {
            tracing::error!(error = %error, "database query failed");
            ApiError::new(request_id, "internal_error", "database query failed")
        }
    }
}

pub(super) fn map_storage_error(request_id: String, error: &StorageError) -> ApiError {
    match error {
        StorageError::NotFound { .. } => ApiError::new(request_id, "not_found", "file not found"),
        StorageError::Credentials(_) => {
            tracing::error!(error = %error, "storage credentials unavailable");
            ApiError::new(
                request_id,
                "credentials_error",
                "storage credentials unavailable",
            )
        }
        _ => {
            tracing::error!(error = %error, "storage request failed");
            ApiError::new(request_id, "storage_error", "storage request failed")
        }
    }
}

/// Strip directory components so an uploaded filename cannot traverse paths
/// or smuggle separators into object keys.
pub(super) fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "").replace("..", "");

    std::path::Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

/// Pull the `file` field out of a multipart body.
pub(super) async fn read_file_field(
    multipart: &mut Multipart,
    request_id: &str,
) -> Result<(String, Vec<u8>), ApiError> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            ApiError::new(
                request_id,
                "validation_error",
                format!("malformed multipart body: {e}"),
            )
        })?;
        let Some(field) = field else {
            return Err(ApiError::new(
                request_id,
                "validation_error",
                "no file field in request",
            ));
        };
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(ToOwned::to_owned).ok_or_else(|| {
            ApiError::new(request_id, "validation_error", "file field has no filename")
        })?;
        let bytes = field.bytes().await.map_err(|e| {
            ApiError::new(
                request_id,
                "validation_error",
                format!("failed to read file field: {e}"),
            )
        })?;
        return Ok((filename, bytes.to_vec()));
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/documents", post(documents::upload_document))
        .route("/api/v1/documents/{id}", get(documents::get_document))
        .route(
            "/api/v1/documents/{id}/find_replace",
            put(documents::find_replace),
        )
        .route(
            "/api/v1/documents/{id}/analyze",
            get(documents::analyze_document),
        )
        .route("/api/v1/upload_dictionary", post(lexicon::upload_lexicon))
        .route("/files/{filename}", get(files::download_file))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match lexidoc_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}
