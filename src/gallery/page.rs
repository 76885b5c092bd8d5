//! The gallery pages: the full grid and the per-category filtered grid.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::{Category, get_all_categories},
    gallery::{ALL_CATEGORIES_SLUG, ImageWithCategory, get_images_with_category},
    html::{
        CATEGORY_BADGE_STYLE, GALLERY_CARD_BODY_STYLE, GALLERY_CARD_IMAGE_STYLE,
        GALLERY_CARD_STYLE, GALLERY_GRID_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        PROMPT_TEXT_STYLE, base,
    },
    image::{delete_button, like_button},
    navigation::NavBar,
};

/// The state needed for rendering the gallery pages.
#[derive(Debug, Clone)]
pub struct GalleryPageState {
    /// The database connection for listing images and categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GalleryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the gallery page with every image.
pub async fn get_gallery_page(State(state): State<GalleryPageState>) -> Result<Response, Error> {
    render_gallery(None, &state)
}

/// Render the gallery page filtered to a single category.
///
/// The slug "all" shows every image; a slug that matches no category shows an
/// empty gallery rather than an error page.
pub async fn get_gallery_category_page(
    Path(slug): Path<String>,
    State(state): State<GalleryPageState>,
) -> Result<Response, Error> {
    render_gallery(Some(&slug), &state)
}

fn render_gallery(slug: Option<&str>, state: &GalleryPageState) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entries = get_images_with_category(slug, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve gallery images: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(gallery_view(slug, &entries, &categories).into_response())
}

fn gallery_view(
    active_slug: Option<&str>,
    entries: &[ImageWithCategory],
    categories: &[Category],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::GALLERY_VIEW).into_html();
    let active_slug = active_slug.unwrap_or(ALL_CATEGORIES_SLUG);

    let filter_link = |label: &str, slug: &str| {
        let url = if slug == ALL_CATEGORIES_SLUG {
            endpoints::GALLERY_VIEW.to_owned()
        } else {
            endpoints::format_endpoint_with(endpoints::GALLERY_CATEGORY_VIEW, slug)
        };

        html! {
            @if slug == active_slug {
                span class="font-bold" { (label) }
            } @else {
                a href=(url) class=(LINK_STYLE) { (label) }
            }
        }
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            nav class="flex flex-wrap gap-4 mb-6"
            {
                (filter_link("All", ALL_CATEGORIES_SLUG))

                @for category in categories
                {
                    (filter_link(category.name.as_ref(), category.slug.as_ref()))
                }
            }

            @if entries.is_empty()
            {
                p
                {
                    "No images here yet. "
                    a href=(endpoints::UPLOAD_VIEW) class=(LINK_STYLE) { "Upload one" }
                    "."
                }
            }
            @else
            {
                div class=(GALLERY_GRID_STYLE)
                {
                    @for entry in entries
                    {
                        (gallery_card(entry))
                    }
                }
            }
        }
    };

    base("Gallery", &[], &content)
}

fn gallery_card(entry: &ImageWithCategory) -> Markup {
    let image = &entry.image;
    let image_url = format!("{}/{}", endpoints::UPLOADS, image.filename);
    let detail_url = endpoints::format_endpoint(endpoints::IMAGE_VIEW, image.id);
    let category_url =
        endpoints::format_endpoint_with(endpoints::GALLERY_CATEGORY_VIEW, entry.category.slug.as_ref());

    html! {
        article class=(GALLERY_CARD_STYLE)
        {
            a href=(detail_url)
            {
                img
                    src=(image_url)
                    alt=(image.prompt)
                    loading="lazy"
                    class=(GALLERY_CARD_IMAGE_STYLE);
            }

            div class=(GALLERY_CARD_BODY_STYLE)
            {
                p class=(PROMPT_TEXT_STYLE) { (image.prompt) }

                div class="flex items-center justify-between"
                {
                    a href=(category_url) class=(CATEGORY_BADGE_STYLE) { (entry.category.name) }

                    div class="flex items-center gap-2"
                    {
                        (like_button(image.id, image.likes))

                        (delete_button(image.id))
                    }
                }
            }
        }
    }
}
