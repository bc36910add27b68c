//! Read-only serving of stored uploads under `/uploads/{category}/{filename}`.

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use sanstha_core::naming::sanitize_file_name;
use sanstha_db::registry::UPLOAD_CATEGORIES;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /uploads/{category}/{filename}
///
/// Serves a stored upload with a content type guessed from the extension.
/// The category must be one of the registered upload categories and the
/// filename passes the same sanitization used when deleting, so a crafted
/// path cannot read outside the category directory.
pub async fn serve(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    if !UPLOAD_CATEGORIES.contains(&category.as_str()) {
        return Err(AppError::NotFound(format!(
            "Unknown upload category: {category}"
        )));
    }

    let clean = sanitize_file_name(&filename)
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let path = state.uploads.root().join(&category).join(clean);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("File not found".to_string()));
        }
        Err(err) => {
            return Err(AppError::InternalError(format!(
                "Failed to read upload: {err}"
            )));
        }
    };

    let mime = mime_guess::from_path(clean).first_or_octet_stream();

    let mut response = (StatusCode::OK, data).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref())
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    Ok(response)
}
