//! Image records, their lifecycle and the mutations that keep the category
//! counters in step with actual membership.

mod db;
mod delete;
mod detail;
mod domain;
mod like;
mod mutation;

pub use db::{
    create_image_table, delete_image_record, get_all_images, get_image, get_images_in_category,
    increment_likes, insert_image,
};
pub(crate) use db::map_image_row_with_offset;
#[cfg(test)]
pub(crate) use db::new_test_image;
pub use delete::{delete_button, delete_image_endpoint};
pub use detail::get_image_page;
pub use domain::{Image, ImageId, NewImage, Prompt};
pub use like::{like_button, like_image_endpoint};
pub use mutation::{delete_image, like_image, upload_image};
