//! The gallery: images joined with their owning category, and the pages that
//! display them.

mod page;
mod view;

pub use page::{get_gallery_category_page, get_gallery_page};
pub use view::{
    ALL_CATEGORIES_SLUG, ImageWithCategory, get_image_with_category, get_images_with_category,
};
