//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/images/{image_id}', use [format_endpoint].

/// The gallery page showing every image.
pub const GALLERY_VIEW: &str = "/";
/// The gallery page filtered to one category slug ("all" shows everything).
pub const GALLERY_CATEGORY_VIEW: &str = "/gallery/{slug}";
/// The page for viewing a single image with its prompt and metadata.
pub const IMAGE_VIEW: &str = "/images/{image_id}";
/// The page for uploading a new image.
pub const UPLOAD_VIEW: &str = "/upload";
/// The page for listing all categories with their image counts.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The route for static files.
pub const STATIC: &str = "/static";
/// The route that serves uploaded image binaries.
pub const UPLOADS: &str = "/uploads";

/// The route to upload an image (multipart form).
pub const POST_IMAGE: &str = "/api/images";
/// The route to delete an image.
pub const DELETE_IMAGE: &str = "/api/images/{image_id}";
/// The route to like an image.
pub const LIKE_IMAGE: &str = "/api/images/{image_id}/like";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/images/{image_id}', '{image_id}' is
/// the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    format_endpoint_with(endpoint_path, &id.to_string())
}

/// Replace the parameter in `endpoint_path` with an arbitrary string value.
///
/// Used for slug parameters, e.g., '/gallery/{slug}'.
pub fn format_endpoint_with(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let Some(param_end) = endpoint_path[param_start..].find('}') else {
        return endpoint_path.to_owned();
    };

    let mut formatted = String::with_capacity(endpoint_path.len() + value.len());
    formatted.push_str(&endpoint_path[..param_start]);
    formatted.push_str(value);
    formatted.push_str(&endpoint_path[param_start + param_end + 1..]);

    formatted
}
