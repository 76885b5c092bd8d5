//! Image deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::BUTTON_DELETE_STYLE,
    image::{ImageId, delete_image},
    upload::FileStore,
};

/// The state needed for deleting an image.
#[derive(Debug, Clone)]
pub struct DeleteImageEndpointState {
    /// The database connection for removing the image record.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The store holding the image binary to remove.
    pub file_store: FileStore,
}

impl FromRef<AppState> for DeleteImageEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            file_store: state.file_store.clone(),
        }
    }
}

/// Handle image deletion.
///
/// Removes the record, decrements the category counter and deletes the
/// binary asset from disk. By the time the response is sent both the record
/// and the asset are gone.
pub async fn delete_image_endpoint(
    Path(image_id): Path<ImageId>,
    State(state): State<DeleteImageEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let image = match delete_image(image_id, &connection) {
        Ok(image) => image,
        Err(Error::DeleteMissingImage) => {
            return Error::DeleteMissingImage.into_alert_response();
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting image {image_id}: {error}"
            );
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.file_store.remove(&image.filename) {
        // The record is gone, so the gallery is consistent; the leftover file
        // is only wasted disk space.
        tracing::error!("could not remove asset '{}': {error}", image.filename);
    }

    Alert::success(
        "Image deleted",
        &format!("Removed '{}' and its file.", image.original_name),
    )
    .into_response()
}

/// The delete button fragment. On success the closest `article` (the gallery
/// card or the detail page body) is removed from the DOM.
pub fn delete_button(image_id: ImageId) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_IMAGE, image_id);

    html! {
        button
            type="button"
            class=(BUTTON_DELETE_STYLE)
            hx-delete=(delete_url)
            hx-confirm="Are you sure you want to delete this image? \
                This cannot be undone."
            hx-target="closest article"
            hx-target-error="#alert-container"
            hx-swap="delete"
        {
            "Delete"
        }
    }
}

#[cfg(test)]
mod delete_image_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        category::{Category, CategoryName, CategorySlug, create_category, get_category},
        db::initialize,
        image::{Image, NewImage, Prompt, upload_image},
        upload::FileStore,
    };

    use super::{DeleteImageEndpointState, delete_image_endpoint};

    fn get_delete_state() -> (tempfile::TempDir, DeleteImageEndpointState, Category, Image) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        let category = create_category(
            CategoryName::new_unchecked("Photography"),
            CategorySlug::new_unchecked("photography"),
            &connection,
        )
        .unwrap();

        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let file_store =
            FileStore::new(dir.path().join("uploads")).expect("Could not create file store");

        let staged = file_store
            .stage("sunset.png", b"pretend png bytes")
            .expect("Could not stage test file");
        let image = upload_image(
            NewImage {
                filename: staged.filename.clone(),
                original_name: "sunset.png".to_owned(),
                prompt: Prompt::new_unchecked("a sunset"),
                category_id: category.id,
                file_path: staged.file_path,
                file_size: staged.file_size,
            },
            &connection,
        )
        .expect("Could not create test image");

        (
            dir,
            DeleteImageEndpointState {
                db_connection: Arc::new(Mutex::new(connection)),
                file_store,
            },
            category,
            image,
        )
    }

    #[tokio::test]
    async fn delete_removes_record_count_and_asset() {
        let (_dir, state, category, image) = get_delete_state();

        let response = delete_image_endpoint(Path(image.id), State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.file_store.root().join(&image.filename).exists());

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_category(category.id, &connection).unwrap().image_count,
            0
        );
    }

    #[tokio::test]
    async fn second_delete_returns_not_found_and_keeps_count() {
        let (_dir, state, category, image) = get_delete_state();

        delete_image_endpoint(Path(image.id), State(state.clone()))
            .await
            .into_response();
        let response = delete_image_endpoint(Path(image.id), State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_category(category.id, &connection).unwrap().image_count,
            0
        );
    }
}
