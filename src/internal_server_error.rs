//! The internal server error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::html::{PAGE_CONTAINER_STYLE, base};

/// Render an internal server error page with a short `description` of what
/// went wrong and a `fix` suggesting what the user can do about it.
pub fn render_internal_server_error(description: &str, fix: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        internal_server_error_view(description, fix),
    )
        .into_response()
}

fn internal_server_error_view(description: &str, fix: &str) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-6xl font-bold" { "500" }
            h2 class="mt-4 text-xl font-semibold" { (description) }
            p class="mt-2 text-lg" { (fix) }
        }
    };

    base("Server Error", &[], &content)
}
