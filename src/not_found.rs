//! The 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
};

/// Render the 404 not found page.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// The 404 not found page as a response.
pub fn get_404_not_found_response() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}

fn not_found_view() -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-6xl font-bold" { "404" }
            p class="mt-4 text-lg" { "The page or image you are looking for does not exist." }
            a href=(endpoints::GALLERY_VIEW) class=(LINK_STYLE) { "Back to the gallery" }
        }
    };

    base("Not Found", &[], &content)
}
