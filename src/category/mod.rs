//! Image categories and the denormalized per-category image counter.

mod create;
mod db;
mod domain;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    adjust_image_count, create_category, create_category_table, get_all_categories, get_category,
    get_category_by_slug, recount_image_counts,
};
pub use domain::{Category, CategoryId, CategoryName, CategorySlug};
pub use list::get_categories_page;
