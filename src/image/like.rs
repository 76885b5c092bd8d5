//! Image like endpoint and the like button fragment.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::BUTTON_LIKE_STYLE,
    image::{ImageId, like_image},
};

/// The state needed for liking an image.
#[derive(Debug, Clone)]
pub struct LikeImageEndpointState {
    /// The database connection for updating the like count.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LikeImageEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle an image like. Returns the updated like button, or an error alert
/// if the image does not exist.
pub async fn like_image_endpoint(
    Path(image_id): Path<ImageId>,
    State(state): State<LikeImageEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match like_image(image_id, &connection) {
        Ok(likes) => like_button(image_id, likes).into_response(),
        Err(Error::NotFound) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while liking image {image_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// The like button fragment. Clicking it swaps in the updated count.
pub fn like_button(image_id: ImageId, likes: i64) -> Markup {
    let like_url = endpoints::format_endpoint(endpoints::LIKE_IMAGE, image_id);

    html! {
        button
            type="button"
            class=(BUTTON_LIKE_STYLE)
            hx-post=(like_url)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
        {
            "\u{2764} " (likes)
        }
    }
}
