//! The image upload page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::{Category, get_all_categories},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the upload page.
#[derive(Debug, Clone)]
pub struct UploadPageState {
    /// The database connection for listing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UploadPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the image upload page with a category picker.
pub async fn get_upload_page(State(state): State<UploadPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(upload_view(&categories).into_response())
}

fn upload_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::UPLOAD_VIEW).into_html();
    let form = upload_form_view(categories);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Upload Image", &[], &content)
}

fn upload_form_view(categories: &[Category]) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_IMAGE)
            enctype="multipart/form-data"
            hx-disabled-elt="#image, #submit-button"
            hx-swap="none"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="image" class=(FORM_LABEL_STYLE) { "Image file" }

                input
                    id="image"
                    type="file"
                    name="image"
                    accept="image/jpeg,image/png,image/gif,image/webp"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="prompt" class=(FORM_LABEL_STYLE) { "Prompt" }

                textarea
                    id="prompt"
                    name="prompt"
                    rows="3"
                    placeholder="The prompt that generated this image"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {}
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category_id"
                    name="category_id"
                    required
                    class=(FORM_SELECT_STYLE)
                {
                    @for category in categories
                    {
                        option value=(category.id) { (category.name) }
                    }
                }

                @if categories.is_empty()
                {
                    p class="mt-2 text-sm"
                    {
                        "No categories yet. "
                        a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                        {
                            "Create one first."
                        }
                    }
                }
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                "Upload Image"
            }
        }
    }
}

#[cfg(test)]
mod upload_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        category::{CategoryName, CategorySlug, create_category},
        db::initialize,
        endpoints,
        test_utils::{
            assert_form_input, assert_form_select, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::{UploadPageState, get_upload_page};

    fn get_upload_page_state() -> UploadPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        UploadPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn render_page_with_category_options() {
        let state = get_upload_page_state();
        create_category(
            CategoryName::new_unchecked("Photography"),
            CategorySlug::new_unchecked("photography"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let response = get_upload_page(State(state))
            .await
            .expect("Could not render page")
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_IMAGE, "hx-post");
        assert_form_input(&form, "image", "file");
        assert_form_select(&form, "category_id");
        assert_form_submit_button(&form);

        let option = scraper::Selector::parse("option").unwrap();
        let option_text = html
            .select(&option)
            .next()
            .expect("No category option found")
            .text()
            .collect::<String>();
        assert_eq!(option_text, "Photography");
    }
}
