use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    state::AppState,
    supabase::PhotoStorage,
    types::{AppError, ValidatedJson},
};

/// One photo as exposed to clients
#[derive(Debug, Serialize)]
pub struct PhotoItem {
    /// Object key within the bucket
    pub name: String,
    /// Publicly resolvable content URL
    pub url: String,
}

/// Binary file part extracted from a multipart form
struct FilePart {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Multipart fields recognized by the upload and update handlers
#[derive(Default)]
struct PhotoForm {
    file: Option<FilePart>,
    old_name: Option<String>,
}

/// Drains a multipart stream into the fields the photo handlers use.
/// Unknown parts are skipped.
async fn read_photo_form(mut multipart: Multipart) -> Result<PhotoForm, AppError> {
    let mut form = PhotoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::bad_request("No form data"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::bad_request("No form data"))?;

                form.file = Some(FilePart {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "oldName" => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::bad_request("No form data"))?;
                form.old_name = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Lists the bucket, newest first, stamping a cache-busting parameter on
/// every URL so browsers re-fetch content after a replace
#[instrument(skip(state))]
pub async fn list_photos(State(state): State<AppState>) -> Result<Json<Vec<PhotoItem>>, AppError> {
    let objects = state.photos.list().await?;

    let photos = objects
        .into_iter()
        .map(|object| PhotoItem {
            url: state.photos.cache_busted_url(&object.name),
            name: object.name,
        })
        .collect();

    Ok(Json(photos))
}

/// Stores a new photo under a freshly generated name
#[instrument(skip(state, multipart))]
pub async fn upload_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PhotoItem>, AppError> {
    let multipart = multipart.map_err(|_| AppError::bad_request("No form data"))?;
    let form = read_photo_form(multipart).await?;

    let FilePart {
        filename,
        content_type,
        data,
    } = form
        .file
        .filter(|file| !file.filename.is_empty() && !file.data.is_empty())
        .ok_or_else(|| AppError::bad_request("No file uploaded"))?;

    let name = PhotoStorage::generate_object_name(&filename);
    let content_type = content_type.unwrap_or_else(|| mime::IMAGE_STAR.to_string());

    state.photos.upload(&name, data, &content_type, false).await?;

    info!(%name, "stored new photo");

    Ok(Json(PhotoItem {
        url: state.photos.public_url(&name),
        name,
    }))
}

/// Replaces the content stored under an existing name, keeping the key
#[instrument(skip(state, multipart))]
pub async fn update_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PhotoItem>, AppError> {
    let multipart = multipart.map_err(|_| AppError::bad_request("No form data"))?;
    let form = read_photo_form(multipart).await?;

    let (file, old_name) = match (form.file, form.old_name) {
        (Some(file), Some(old_name)) if !old_name.is_empty() => (file, old_name),
        _ => return Err(AppError::bad_request("Missing file or oldName")),
    };

    let content_type = file
        .content_type
        .unwrap_or_else(|| mime::IMAGE_STAR.to_string());

    state
        .photos
        .upload(&old_name, file.data, &content_type, true)
        .await?;

    info!(name = %old_name, "replaced photo content");

    Ok(Json(PhotoItem {
        url: state.photos.public_url(&old_name),
        name: old_name,
    }))
}

/// Delete request body
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRequest {
    /// Object key to remove from the bucket
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing file name"))]
    pub name: String,
}

/// Delete response body
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always true; failures surface as error responses instead
    pub success: bool,
}

/// Removes the named photo from the bucket
#[instrument(skip(state, payload))]
pub async fn delete_photo(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteRequest>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.photos.remove(&payload.name).await?;

    info!(name = %payload.name, "removed photo");

    Ok(Json(DeleteResponse { success: true }))
}
