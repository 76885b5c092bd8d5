//! The mutations that must keep the image table and the per-category image
//! counter moving together.
//!
//! Each category's `image_count` is derived data: between operations it must
//! equal the number of images referencing that category. The functions here
//! pair every image insert or delete with the matching counter adjustment
//! inside one SQLite transaction, which is the strongest grouping the storage
//! engine offers. The individual counter adjustment is itself a single atomic
//! UPDATE, and [recount_image_counts](crate::category::recount_image_counts)
//! exists as compensation should the counters ever drift out of band.

use rusqlite::Connection;

use crate::{
    Error,
    category::{adjust_image_count, get_category},
    image::{
        Image, ImageId,
        db::{delete_image_record, get_image, increment_likes, insert_image},
        domain::NewImage,
    },
};

/// Create an image record and increment its category's image count.
///
/// The category is checked first: a `NewImage` naming a nonexistent category
/// creates nothing and changes no counter.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if `new_image.category_id` does not
/// refer to an existing category.
pub fn upload_image(new_image: NewImage, connection: &Connection) -> Result<Image, Error> {
    match get_category(new_image.category_id, connection) {
        Ok(_) => {}
        Err(Error::NotFound) => return Err(Error::CategoryNotFound),
        Err(error) => return Err(error),
    }

    let tx = connection.unchecked_transaction()?;

    let image = insert_image(new_image, &tx)?;
    adjust_image_count(image.category_id, 1, &tx)?;

    tx.commit()?;

    tracing::info!(
        "created image {} in category {}",
        image.id,
        image.category_id
    );

    Ok(image)
}

/// Delete an image record and decrement its category's image count.
///
/// Returns the deleted image so the caller can remove the asset from disk.
/// Idempotent at the error level: a second delete of the same ID reports
/// [Error::DeleteMissingImage] and leaves every counter untouched.
pub fn delete_image(image_id: ImageId, connection: &Connection) -> Result<Image, Error> {
    let image = match get_image(image_id, connection) {
        Ok(image) => image,
        Err(Error::NotFound) => return Err(Error::DeleteMissingImage),
        Err(error) => return Err(error),
    };

    let tx = connection.unchecked_transaction()?;

    delete_image_record(image.id, &tx)?;
    adjust_image_count(image.category_id, -1, &tx)?;

    tx.commit()?;

    tracing::info!(
        "deleted image {} from category {}",
        image.id,
        image.category_id
    );

    Ok(image)
}

/// Add one like to an image and return the new like count.
///
/// # Errors
/// Returns [Error::NotFound] if the image does not exist; no state changes.
pub fn like_image(image_id: ImageId, connection: &Connection) -> Result<i64, Error> {
    increment_likes(image_id, connection)
}
