//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{create_category_endpoint, get_categories_page, get_new_category_page},
    endpoints,
    gallery::{get_gallery_category_page, get_gallery_page},
    image::{delete_image_endpoint, get_image_page, like_image_endpoint},
    logging::logging_middleware,
    not_found::get_404_not_found,
    upload::{MAX_UPLOAD_BYTES, get_upload_page, upload_image_endpoint},
};

/// Headroom on top of the upload limit for the other multipart fields and
/// the multipart framing itself.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::GALLERY_VIEW, get(get_gallery_page))
        .route(
            endpoints::GALLERY_CATEGORY_VIEW,
            get(get_gallery_category_page),
        )
        .route(endpoints::IMAGE_VIEW, get(get_image_page))
        .route(endpoints::UPLOAD_VIEW, get(get_upload_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page));

    let api_routes = Router::new()
        .route(
            endpoints::POST_IMAGE,
            post(upload_image_endpoint).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(endpoints::DELETE_IMAGE, delete(delete_image_endpoint))
        .route(endpoints::LIKE_IMAGE, post(like_image_endpoint))
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .nest_service(
            endpoints::UPLOADS,
            ServeDir::new(state.file_store.root().to_path_buf()),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
