//! Unified request payload extraction for content handlers.
//!
//! Write endpoints accept either `application/json` or
//! `multipart/form-data`. [`ContentPayload`] normalizes both into one
//! shape: a JSON field map plus the stored upload, if the request carried
//! a file. Multipart file parts are written to the upload store as they
//! stream in, with the category chosen by the form field name; the
//! handler that runs afterwards owns the stored file and must discard it
//! on any failure path.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use sanstha_core::error::CoreError;
use sanstha_db::registry;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// A file written to the upload store during payload extraction.
#[derive(Debug)]
pub struct StoredUpload {
    pub category: &'static str,
    pub name: String,
}

/// The parsed body of a content write request.
pub struct ContentPayload {
    /// Text fields, keyed by their payload names.
    pub fields: serde_json::Map<String, Value>,
    /// The stored file, when the request was multipart with a file part.
    pub upload: Option<StoredUpload>,
}

impl FromRequest<AppState> for ContentPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            return from_multipart(multipart, state).await;
        }

        // A bodyless POST (no content type) is treated as an empty field
        // map so resource-level validation produces the useful error.
        if content_type.is_empty() {
            return Ok(Self {
                fields: serde_json::Map::new(),
                upload: None,
            });
        }

        let Json(value): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let fields = match value {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(AppError::BadRequest(format!(
                    "Expected a JSON object, got {other}"
                )))
            }
        };

        Ok(Self {
            fields,
            upload: None,
        })
    }
}

/// Walk the multipart fields: text parts land in the field map, the file
/// part is stored under the category its field name maps to.
///
/// Single-file forms only; a second file part is rejected. Unknown file
/// field names are rejected outright rather than falling back to the
/// upload root the way the legacy middleware did.
async fn from_multipart(
    mut multipart: Multipart,
    state: &AppState,
) -> Result<ContentPayload, AppError> {
    let mut fields = serde_json::Map::new();
    let mut upload: Option<StoredUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if let Some(original_name) = field.file_name().map(str::to_owned) {
            if upload.is_some() {
                discard(state, &upload).await;
                return Err(AppError::Core(CoreError::Validation(
                    "Only one file per request is supported".to_string(),
                )));
            }

            let Some(category) = registry::category_for_field(&name) else {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Unknown upload field: {name}"
                ))));
            };

            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            let stored = state
                .uploads
                .store(category, &bytes, &original_name)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

            upload = Some(StoredUpload {
                category,
                name: stored,
            });
        } else {
            let text = match field.text().await {
                Ok(text) => text,
                Err(e) => {
                    discard(state, &upload).await;
                    return Err(AppError::BadRequest(e.to_string()));
                }
            };
            fields.insert(name, Value::String(text));
        }
    }

    Ok(ContentPayload { fields, upload })
}

/// Best-effort cleanup of a file stored earlier in a failed extraction.
pub async fn discard(state: &AppState, upload: &Option<StoredUpload>) {
    if let Some(stored) = upload {
        state.uploads.delete(stored.category, &stored.name).await;
    }
}
