//! The single image detail page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    gallery::{ImageWithCategory, get_image_with_category},
    html::{CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_file_size},
    image::{ImageId, delete_button, like_button},
    navigation::NavBar,
};

/// The state needed for rendering the image detail page.
#[derive(Debug, Clone)]
pub struct ImagePageState {
    /// The database connection for retrieving the image and its category.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ImagePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the detail page for a single image.
///
/// Responds with the 404 page when the image does not exist, and also when
/// its category record has gone missing.
pub async fn get_image_page(
    Path(image_id): Path<ImageId>,
    State(state): State<ImagePageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entry = get_image_with_category(image_id, &connection)?;

    Ok(image_detail_view(&entry).into_response())
}

fn image_detail_view(entry: &ImageWithCategory) -> Markup {
    let image = &entry.image;
    let image_url = format!("{}/{}", endpoints::UPLOADS, image.filename);
    let gallery_url =
        endpoints::format_endpoint_with(endpoints::GALLERY_CATEGORY_VIEW, entry.category.slug.as_ref());

    let nav_bar = NavBar::new(endpoints::GALLERY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            article class="flex flex-col gap-4 w-full max-w-3xl"
            {
                img
                    src=(image_url)
                    alt=(image.prompt)
                    class="w-full rounded-lg shadow";

                div class="flex items-center gap-3"
                {
                    a href=(gallery_url) class=(CATEGORY_BADGE_STYLE) { (entry.category.name) }

                    (like_button(image.id, image.likes))

                    (delete_button(image.id))
                }

                section
                {
                    h1 class="text-lg font-bold mb-1" { "Prompt" }
                    p class="text-gray-700 dark:text-gray-300" { (image.prompt) }
                }

                dl class="grid grid-cols-2 gap-x-8 gap-y-1 text-sm max-w-md"
                {
                    dt class="font-semibold" { "Original file" }
                    dd { (image.original_name) }

                    dt class="font-semibold" { "File size" }
                    dd { (format_file_size(image.file_size)) }

                    dt class="font-semibold" { "Uploaded" }
                    dd { (image.upload_date.date()) }
                }

                a href=(endpoints::GALLERY_VIEW) class=(LINK_STYLE) { "Back to gallery" }
            }
        }
    };

    base("Image", &[], &content)
}

#[cfg(test)]
mod image_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        category::{CategoryName, CategorySlug, create_category},
        db::initialize,
        image::{ImageId, new_test_image, upload_image},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{ImagePageState, get_image_page};

    fn get_image_page_state() -> (ImagePageState, ImageId) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        let category = create_category(
            CategoryName::new_unchecked("Photography"),
            CategorySlug::new_unchecked("photography"),
            &connection,
        )
        .unwrap();
        let image =
            upload_image(new_test_image(category.id, "a red fox in snow"), &connection).unwrap();

        (
            ImagePageState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            image.id,
        )
    }

    #[tokio::test]
    async fn page_shows_prompt_and_category() {
        let (state, image_id) = get_image_page_state();

        let response = get_image_page(Path(image_id), State(state))
            .await
            .expect("Could not render page")
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("a red fox in snow"));
        assert!(text.contains("Photography"));

        assert!(
            html.select(&Selector::parse("img").unwrap()).next().is_some(),
            "No image element found"
        );
    }

    #[tokio::test]
    async fn missing_image_returns_not_found_page() {
        let (state, image_id) = get_image_page_state();

        let response = get_image_page(Path(image_id + 999), State(state))
            .await
            .expect_err("Expected an error for a missing image")
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
