//! Stored document serving.
//!
//! Uploaded documents are referenced by the storage key returned at upload
//! time. This route streams them back with a content type derived from the
//! key's extension.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::error;

use crate::AppState;
use edulink_core::storage::StorageError;

/// Creates the file serving router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/files/{*key}", get(serve_file))
}

/// GET /files/{*key} - Stream a stored document.
async fn serve_file(State(state): State<AppState>, Path(key): Path<String>) -> impl IntoResponse {
    // Generated keys never contain dot-dot segments.
    if is_traversal(&key) {
        return file_not_found();
    }

    match state.storage.read(&key).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&key))],
            data,
        )
            .into_response(),
        Err(StorageError::NotFound { .. }) => file_not_found(),
        Err(e) => {
            error!(key = %key, error = %e, "Failed to read stored file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "STORAGE_ERROR",
                    "message": "Failed to read file"
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Renders the not-found response for unknown or malformed keys.
fn file_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "FILE_NOT_FOUND",
            "message": "File not found"
        })),
    )
        .into_response()
}

/// True when any path segment of the key is a dot-dot.
fn is_traversal(key: &str) -> bool {
    key.split('/').any(|segment| segment == "..")
}

/// Maps a stored key's extension to a content type.
fn content_type_for(key: &str) -> &'static str {
    let extension = key.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("school/1f3a.pdf", "application/pdf")]
    #[case("donor/cert.PDF", "application/pdf")]
    #[case("request/letter.doc", "application/msword")]
    #[case(
        "request/letter.docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    )]
    #[case("donation/photo.jpg", "image/jpeg")]
    #[case("donation/photo.jpeg", "image/jpeg")]
    #[case("volunteer/nic.png", "image/png")]
    #[case("school/archive.zip", "application/octet-stream")]
    #[case("noextension", "application/octet-stream")]
    fn test_content_type_for(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(key), expected);
    }

    #[rstest]
    #[case("../etc/passwd", true)]
    #[case("school/../../etc/passwd", true)]
    #[case("school/..", true)]
    #[case("school/1f3a.pdf", false)]
    #[case("school/..hidden.pdf", false)]
    fn test_is_traversal(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_traversal(key), expected);
    }
}
