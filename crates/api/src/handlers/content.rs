//! Generic handlers for the six content resources.
//!
//! Dispatch is by path slug against the static registry, so every
//! resource shares these five handlers. The image lifecycle rules live
//! here, once:
//!
//! - create: the file is already on disk when the handler runs; a failed
//!   insert discards it so a failed write never leaves an orphan.
//! - update: the row is written first with the new image reference; the
//!   replaced file is deleted only after the write succeeds, so the worst
//!   crash outcome is a stale file, never a row pointing at nothing.
//! - delete: row first, then the referenced file.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sanstha_core::error::CoreError;
use sanstha_core::types::DbId;
use sanstha_db::registry::{self, Resource};
use sanstha_db::repo::ContentRepo;
use sanstha_db::values::extract_values;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::ApiPath;
use crate::payload::{discard, ContentPayload};
use crate::state::AppState;

fn lookup(slug: &str) -> Result<&'static Resource, AppError> {
    registry::find(slug).ok_or_else(|| AppError::NotFound(format!("Unknown resource: {slug}")))
}

/// Read a row's image reference, if the resource has an image column and
/// the row holds one.
fn image_reference(resource: &Resource, row: &sanstha_db::repo::JsonRow) -> Option<String> {
    let spec = resource.image.as_ref()?;
    row.get(spec.column)?.as_str().map(str::to_owned)
}

/// Reject a payload whose stored upload does not belong to this resource.
///
/// The upload category is chosen by form field name before routing, so a
/// mismatched field (posting a `hero` file to `/api/events`) is caught
/// here instead of silently attaching a file from another category.
fn check_upload_category(resource: &Resource, payload: &ContentPayload) -> Result<(), AppError> {
    let Some(upload) = &payload.upload else {
        return Ok(());
    };
    match &resource.image {
        Some(spec) if spec.category == upload.category => Ok(()),
        Some(spec) => Err(AppError::Core(CoreError::Validation(format!(
            "Unexpected upload category: got {}, {} expects {}",
            upload.category, resource.slug, spec.category
        )))),
        None => Err(AppError::Core(CoreError::Validation(format!(
            "{} does not accept file uploads",
            resource.name
        )))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/{resource}
pub async fn list(
    State(state): State<AppState>,
    ApiPath(resource): ApiPath<String>,
) -> AppResult<Json<Value>> {
    let resource = lookup(&resource)?;
    let rows = ContentRepo::list(&state.pool, resource).await?;
    Ok(Json(Value::Array(
        rows.into_iter().map(Value::Object).collect(),
    )))
}

/// GET /api/{resource}/{id}
pub async fn get(
    State(state): State<AppState>,
    ApiPath((resource, id)): ApiPath<(String, DbId)>,
) -> AppResult<Json<Value>> {
    let resource = lookup(&resource)?;
    let row = ContentRepo::fetch(&state.pool, resource, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: resource.name,
            id,
        }))?;
    Ok(Json(Value::Object(row)))
}

/// POST /api/{resource}
///
/// 201 with the created row. Any failure after the multipart extractor
/// stored a file discards that file again.
pub async fn create(
    State(state): State<AppState>,
    ApiPath(resource): ApiPath<String>,
    payload: ContentPayload,
) -> AppResult<(StatusCode, Json<Value>)> {
    let result = create_inner(&state, &resource, &payload).await;
    if result.is_err() {
        discard(&state, &payload.upload).await;
    }
    result
}

async fn create_inner(
    state: &AppState,
    slug: &str,
    payload: &ContentPayload,
) -> AppResult<(StatusCode, Json<Value>)> {
    let resource = lookup(slug)?;
    check_upload_category(resource, payload)?;

    if let Some(spec) = &resource.image {
        if spec.required && payload.upload.is_none() {
            return Err(AppError::Core(CoreError::Validation(
                "Image is required".to_string(),
            )));
        }
    }

    let values = extract_values(resource, &payload.fields).map_err(AppError::Core)?;
    let image = payload.upload.as_ref().map(|u| u.name.as_str());

    let row = ContentRepo::insert(&state.pool, resource, &values, image).await?;
    Ok((StatusCode::CREATED, Json(Value::Object(row))))
}

/// PUT /api/{resource}/{id}
///
/// Full replace of the configured fields. A new file replaces the old
/// one; the old file is deleted only after the row write succeeded.
/// Gallery and messages answer 405.
pub async fn update(
    State(state): State<AppState>,
    ApiPath((resource, id)): ApiPath<(String, DbId)>,
    payload: ContentPayload,
) -> AppResult<Json<Value>> {
    let result = update_inner(&state, &resource, id, &payload).await;
    if result.is_err() {
        discard(&state, &payload.upload).await;
    }
    result
}

async fn update_inner(
    state: &AppState,
    slug: &str,
    id: DbId,
    payload: &ContentPayload,
) -> AppResult<Json<Value>> {
    let resource = lookup(slug)?;
    if !resource.supports_update {
        return Err(AppError::MethodNotAllowed(format!(
            "{} does not support update",
            resource.name
        )));
    }
    check_upload_category(resource, payload)?;

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: resource.name,
            id,
        })
    };

    let current = ContentRepo::fetch(&state.pool, resource, id)
        .await?
        .ok_or_else(not_found)?;

    let values = extract_values(resource, &payload.fields).map_err(AppError::Core)?;

    let previous_image = image_reference(resource, &current);
    let image = match &payload.upload {
        Some(upload) => Some(upload.name.clone()),
        None => previous_image.clone(),
    };

    let row = ContentRepo::update(&state.pool, resource, id, &values, image.as_deref())
        .await?
        .ok_or_else(not_found)?;

    // Write-first ordering: the replaced file is deleted only now that the
    // row points at the new one.
    if payload.upload.is_some() {
        if let (Some(spec), Some(old)) = (&resource.image, previous_image) {
            state.uploads.delete(spec.category, &old).await;
        }
    }

    Ok(Json(Value::Object(row)))
}

/// DELETE /api/{resource}/{id}
///
/// 204 regardless of whether the row existed. The referenced file is
/// deleted after the row delete.
pub async fn remove(
    State(state): State<AppState>,
    ApiPath((resource, id)): ApiPath<(String, DbId)>,
) -> AppResult<StatusCode> {
    let resource = lookup(&resource)?;

    let image = if resource.image.is_some() {
        ContentRepo::fetch(&state.pool, resource, id)
            .await?
            .and_then(|row| image_reference(resource, &row))
    } else {
        None
    };

    ContentRepo::delete(&state.pool, resource, id).await?;

    if let (Some(spec), Some(name)) = (&resource.image, image) {
        state.uploads.delete(spec.category, &name).await;
    }

    Ok(StatusCode::NO_CONTENT)
}
