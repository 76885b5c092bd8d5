//! Promptfolio is a self-hosted gallery for AI-generated images.
//!
//! Visitors browse images grouped by category and read the prompts that
//! produced them; the administrator uploads, deletes and likes images.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod db;
mod endpoints;
mod gallery;
mod html;
mod image;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod upload;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{
    Category, CategoryName, CategorySlug, create_category, get_all_categories, get_category,
    get_category_by_slug, recount_image_counts,
};
pub use db::initialize as initialize_db;
pub use gallery::{ImageWithCategory, get_image_with_category, get_images_with_category};
pub use image::{
    Image, NewImage, Prompt, delete_image, get_all_images, get_image, get_images_in_category,
    like_image, upload_image,
};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use upload::FileStore;

use crate::{
    alert::Alert, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an image that does not exist.
    ///
    /// Distinct from [Error::NotFound] so a repeated delete reports "already
    /// gone" instead of adjusting the category counter a second time.
    #[error("tried to delete an image that is not in the database")]
    DeleteMissingImage,

    /// The category ID used to create an image did not match a valid category.
    ///
    /// Blocks image creation entirely: no image record is written and no
    /// category counter is changed.
    #[error("the category ID does not refer to a valid category")]
    CategoryNotFound,

    /// The slug used to create a category already exists in the database.
    #[error("a category with this slug already exists")]
    DuplicateSlug,

    /// The name used to create a category already exists in the database.
    #[error("a category with this name already exists")]
    DuplicateCategoryName,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used as an image prompt.
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    /// A category slug was empty or contained characters that are not safe in
    /// a URL path segment.
    #[error("\"{0}\" is not a valid slug: use lowercase letters, digits and hyphens")]
    InvalidSlug(String),

    /// The multipart form could not be parsed as an image upload.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file is not an allowed image type.
    #[error("File is not an image (jpeg, png, gif or webp)")]
    NotAnImage,

    /// The uploaded file exceeds the maximum allowed size in bytes.
    #[error("File is larger than the upload limit of {0} bytes")]
    FileTooLarge(usize),

    /// The staged upload file could not be written or removed.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("file storage failed: {0}")]
    FileStorageError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed. The only
            // foreign key in the schema is image.category_id.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::CategoryNotFound
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.slug") =>
            {
                Error::DuplicateSlug
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.name") =>
            {
                Error::DuplicateCategoryName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::DeleteMissingImage | Error::CategoryNotFound => {
                get_404_not_found_response()
            }
            Error::DatabaseLockError => render_internal_server_error(
                "Database Unavailable",
                "The server could not access its database. Please try again.",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::CategoryNotFound => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid category",
                    "The selected category does not exist. \
                        Refresh the page and pick a category from the list.",
                )
                .into_html(),
            )
                .into_response(),
            Error::DeleteMissingImage => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete image",
                    "The image could not be found. \
                        Try refreshing the page to see if the image has already been deleted.",
                )
                .into_html(),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::error_simple("The image could not be found.").into_html(),
            )
                .into_response(),
            Error::DuplicateSlug => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Duplicate slug",
                    "A category with this slug already exists. \
                        Choose a different slug or reuse the existing category.",
                )
                .into_html(),
            )
                .into_response(),
            Error::DuplicateCategoryName => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Duplicate category name",
                    "A category with this name already exists.",
                )
                .into_html(),
            )
                .into_response(),
            error @ (Error::EmptyCategoryName
            | Error::EmptyPrompt
            | Error::InvalidSlug(_)
            | Error::NotAnImage
            | Error::FileTooLarge(_)
            | Error::MultipartError(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::error_simple(&error.to_string()).into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, \
                            check the server logs for more details.",
                    )
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}
