//! Categories listing page.

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
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    /// The database connection for listing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the categories listing page with image counts.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(categories_view(&categories).into_response())
}

fn categories_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |category: &Category| {
        let gallery_url =
            endpoints::format_endpoint_with(endpoints::GALLERY_CATEGORY_VIEW, category.slug.as_ref());

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (category.name) }
                }

                td class=(TABLE_CELL_STYLE) { (category.slug) }

                td class=(TABLE_CELL_STYLE) { (category.image_count) }

                td class=(TABLE_CELL_STYLE)
                {
                    a href=(gallery_url) class=(LINK_STYLE) { "View images" }
                }
            }
        )
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex items-center justify-between w-full max-w-2xl mb-4"
            {
                h1 class="text-2xl font-bold" { "Categories" }

                a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE) { "New category" }
            }

            @if categories.is_empty()
            {
                p { "No categories yet." }
            }
            @else
            {
                table class="w-full max-w-2xl text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Slug" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Images" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "" }
                        }
                    }

                    tbody
                    {
                        @for category in categories
                        {
                            (table_row(category))
                        }
                    }
                }
            }
        }
    };

    base("Categories", &[], &content)
}
