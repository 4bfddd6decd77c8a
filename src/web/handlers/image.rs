//! Image lookup and upload handlers.

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::QueryRejection,
        Multipart, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::image::{ImageName, StagedUpload};
use crate::web::dto::{LookupResponse, NameQuery, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Multipart field carrying the uploaded image.
pub const FILE_FIELD: &str = "file";

/// GET /api/getImage?name= - Look up the image stored under a name.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let name = parse_name(query)?;

    if state.store.exists(&name) {
        Ok(Json(LookupResponse {
            filename: name.filename(),
        }))
    } else {
        tracing::debug!(name = %name, "Image not found");
        Err(ApiError::NotFound(name.into_string()))
    }
}

/// POST /api/upload?name= - Store an upload as `<name>.jpg`, replacing any previous image.
///
/// Request body: multipart/form-data with a `file` field. A bad name is
/// reported ahead of anything wrong with the body; every path that does not
/// store the staged file removes it.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NameQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let name = parse_name(query);

    let received = match multipart {
        Ok(multipart) => receive_file(&state, multipart).await,
        Err(rejection) => {
            tracing::debug!("Upload without a multipart body: {}", rejection);
            Ok(None)
        }
    };

    let name = match name {
        Ok(name) => name,
        Err(e) => {
            if let Ok(Some(upload)) = &received {
                discard_staged(&state, upload);
            }
            return Err(e);
        }
    };

    let staged = received?.ok_or(ApiError::MissingFile)?;
    let filename = name.filename();

    if let Err(e) = state.store.store(&name, &staged.path) {
        tracing::error!("[upload] Failed to save {}: {}", filename, e);
        discard_staged(&state, &staged);
        return Err(ApiError::StorageFailure);
    }

    tracing::info!(filename = %filename, size = staged.size, "Saved uploaded image");

    Ok(Json(UploadResponse::saved(filename)))
}

/// Normalize the `name` query parameter.
///
/// A query string that doesn't deserialize (e.g. `name` given twice) counts
/// as a missing name.
fn parse_name(query: Result<Query<NameQuery>, QueryRejection>) -> Result<ImageName, ApiError> {
    match query {
        Ok(Query(query)) => Ok(ImageName::parse(query.raw())?),
        Err(rejection) => {
            tracing::debug!("Unreadable query string: {}", rejection);
            Err(ApiError::MissingParameter)
        }
    }
}

/// Stream the first `file` field of the body into the staging directory.
///
/// Other fields, and any further `file` fields, are skipped.
async fn receive_file(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<Option<StagedUpload>, ApiError> {
    let mut staged: Option<StagedUpload> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                if let Some(upload) = &staged {
                    discard_staged(state, upload);
                }
                return Err(multipart_error(state, e));
            }
        };

        if staged.is_some() || field.name() != Some(FILE_FIELD) {
            continue;
        }

        staged = Some(stage_field(state, field).await?);
    }

    Ok(staged)
}

/// Write one multipart field to a fresh staging file.
async fn stage_field(state: &AppState, mut field: Field<'_>) -> Result<StagedUpload, ApiError> {
    let mut writer = state.staging.create().await.map_err(|e| {
        tracing::error!("[upload] Failed to create staging file: {}", e);
        ApiError::StorageFailure
    })?;

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = writer.write(&chunk).await {
                    tracing::error!("[upload] Failed to write staging file: {}", e);
                    writer.abort();
                    return Err(ApiError::StorageFailure);
                }
            }
            Ok(None) => break,
            Err(e) => {
                writer.abort();
                return Err(multipart_error(state, e));
            }
        }
    }

    writer.finish().await.map_err(|e| {
        tracing::error!("[upload] Failed to finish staging file: {}", e);
        ApiError::StorageFailure
    })
}

fn multipart_error(state: &AppState, err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload rejected: {}", err.body_text());
        ApiError::PayloadTooLarge(state.max_upload_size_mb)
    } else {
        tracing::warn!("Failed to read multipart body: {}", err.body_text());
        ApiError::InvalidMultipart
    }
}

/// Best-effort removal of a staged upload; failures are logged, never returned.
fn discard_staged(state: &AppState, upload: &StagedUpload) {
    if let Err(e) = state.store.remove(&upload.path) {
        tracing::warn!(
            path = %upload.path.display(),
            error = %e,
            "Failed to remove staged upload"
        );
    }
}
