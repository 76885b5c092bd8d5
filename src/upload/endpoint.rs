//! The multipart endpoint for uploading an image.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::CategoryId,
    image::{NewImage, Prompt, upload_image},
    upload::{FileStore, StagedFile},
};

/// The state needed for uploading an image.
#[derive(Debug, Clone)]
pub struct UploadImageState {
    /// The database connection for creating the image record.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The store that holds the uploaded binary.
    pub file_store: FileStore,
}

impl FromRef<AppState> for UploadImageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            file_store: state.file_store.clone(),
        }
    }
}

/// The fields parsed out of the upload form.
struct UploadForm {
    original_name: String,
    data: Vec<u8>,
    prompt: Prompt,
    category_id: CategoryId,
}

/// Handle the image upload form submission.
///
/// Stages the binary on disk, then creates the image record and bumps the
/// category counter. If the record cannot be written the staged file is
/// removed again so a failed upload leaves nothing behind.
pub async fn upload_image_endpoint(
    State(state): State<UploadImageState>,
    multipart: Multipart,
) -> Result<Response, Response> {
    let form = parse_upload_form(multipart)
        .await
        .map_err(|error| error.into_alert_response())?;

    let staged = state
        .file_store
        .stage(&form.original_name, &form.data)
        .map_err(|error| error.into_alert_response())?;

    let new_image = NewImage {
        filename: staged.filename.clone(),
        original_name: form.original_name,
        prompt: form.prompt,
        category_id: form.category_id,
        file_path: staged.file_path.clone(),
        file_size: staged.file_size,
    };

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        unstage(&state.file_store, &staged);
        Error::DatabaseLockError.into_alert_response()
    })?;

    match upload_image(new_image, &connection) {
        Ok(_) => Ok((
            HxRedirect(endpoints::GALLERY_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response()),
        Err(error) => {
            tracing::error!("An unexpected error occurred while uploading an image: {error}");
            unstage(&state.file_store, &staged);

            Err(error.into_alert_response())
        }
    }
}

/// Remove a staged file after a failed upload. Best effort: a leftover file
/// is only wasted disk space, never an inconsistency in the gallery.
fn unstage(file_store: &FileStore, staged: &StagedFile) {
    if let Err(error) = file_store.remove(&staged.filename) {
        tracing::error!("could not remove staged file '{}': {error}", staged.filename);
    }
}

async fn parse_upload_form(mut multipart: Multipart) -> Result<UploadForm, Error> {
    let mut file = None;
    let mut raw_prompt = None;
    let mut raw_category_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
    {
        match field.name() {
            Some("image") => {
                let original_name = field
                    .file_name()
                    .ok_or_else(|| {
                        Error::MultipartError(
                            "Could not get file name from multipart form field".to_owned(),
                        )
                    })?
                    .to_owned();

                let data = field.bytes().await.map_err(|error| {
                    tracing::error!("Could not read data from multipart form field: {error}");
                    Error::MultipartError(
                        "Could not read data from multipart form field.".to_owned(),
                    )
                })?;

                file = Some((original_name, data.to_vec()));
            }
            Some("prompt") => {
                raw_prompt = Some(field.text().await.map_err(|error| {
                    Error::MultipartError(format!("Could not read prompt field: {error}"))
                })?);
            }
            Some("category_id") => {
                raw_category_id = Some(field.text().await.map_err(|error| {
                    Error::MultipartError(format!("Could not read category field: {error}"))
                })?);
            }
            name => {
                tracing::debug!("ignoring unexpected multipart field {name:?}");
            }
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| Error::MultipartError("No image file provided".to_owned()))?;

    let prompt = Prompt::new(&raw_prompt.unwrap_or_default())?;

    let category_id = raw_category_id
        .unwrap_or_default()
        .parse::<CategoryId>()
        .map_err(|_| Error::CategoryNotFound)?;

    Ok(UploadForm {
        original_name,
        data,
        prompt,
        category_id,
    })
}
