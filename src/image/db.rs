//! Record-level database operations for images.
//!
//! These functions only touch the image table. The operations that must keep
//! the category counter in step (upload, delete) live in
//! [mutation](crate::image::mutation) and are the only intended callers of
//! the write functions here.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryId,
    image::{Image, ImageId, NewImage, Prompt},
};

/// Insert an image record with zero likes and an upload date of now, and
/// return it with its generated ID.
///
/// The caller is responsible for ensuring `category_id` refers to an existing
/// category and for adjusting that category's image count.
pub fn insert_image(new_image: NewImage, connection: &Connection) -> Result<Image, Error> {
    let upload_date = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO image (filename, original_name, prompt, category_id, likes, file_path, file_size, upload_date)
        VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7);",
        (
            &new_image.filename,
            &new_image.original_name,
            new_image.prompt.as_ref(),
            new_image.category_id,
            &new_image.file_path,
            new_image.file_size,
            upload_date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Image {
        id,
        filename: new_image.filename,
        original_name: new_image.original_name,
        prompt: new_image.prompt,
        category_id: new_image.category_id,
        likes: 0,
        file_path: new_image.file_path,
        file_size: new_image.file_size,
        upload_date,
    })
}

/// Retrieve a single image by ID.
pub fn get_image(image_id: ImageId, connection: &Connection) -> Result<Image, Error> {
    connection
        .prepare(&format!(
            "SELECT {IMAGE_COLUMNS} FROM image WHERE id = :id;"
        ))?
        .query_row(&[(":id", &image_id)], map_image_row)
        .map_err(|error| error.into())
}

/// Delete an image record by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingImage] if no record exists, so a repeated
/// delete is distinguishable from a successful one and the caller knows not
/// to decrement the category counter again.
pub fn delete_image_record(image_id: ImageId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM image WHERE id = ?1", [image_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingImage);
    }

    Ok(())
}

/// Add one to an image's like count and return the new count.
///
/// The increment is a single UPDATE statement, so concurrent likes cannot
/// lose updates.
///
/// # Errors
/// Returns [Error::NotFound] if the image does not exist; no state changes.
pub fn increment_likes(image_id: ImageId, connection: &Connection) -> Result<i64, Error> {
    let rows_affected = connection.execute(
        "UPDATE image SET likes = likes + 1 WHERE id = ?1",
        [image_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    connection
        .prepare("SELECT likes FROM image WHERE id = :id;")?
        .query_row(&[(":id", &image_id)], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Retrieve every image, in no guaranteed order.
pub fn get_all_images(connection: &Connection) -> Result<Vec<Image>, Error> {
    connection
        .prepare(&format!("SELECT {IMAGE_COLUMNS} FROM image;"))?
        .query_map([], map_image_row)?
        .map(|maybe_image| maybe_image.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the images belonging to one category.
pub fn get_images_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<Image>, Error> {
    connection
        .prepare(&format!(
            "SELECT {IMAGE_COLUMNS} FROM image WHERE category_id = :category_id;"
        ))?
        .query_map(&[(":category_id", &category_id)], map_image_row)?
        .map(|maybe_image| maybe_image.map_err(|error| error.into()))
        .collect()
}

/// Initialize the image table and indexes.
///
/// The foreign key on `category_id` documents the reference and the index
/// supports category-scoped listing; existence of the category is enforced by
/// the upload path rather than the database engine.
pub fn create_image_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS image (
            id INTEGER PRIMARY KEY,
            filename TEXT NOT NULL,
            original_name TEXT NOT NULL,
            prompt TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES category(id),
            likes INTEGER NOT NULL DEFAULT 0,
            file_path TEXT NOT NULL,
            file_size INTEGER NOT NULL,
            upload_date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_image_category_id ON image(category_id);",
    )?;

    Ok(())
}

pub(crate) const IMAGE_COLUMNS: &str =
    "id, filename, original_name, prompt, category_id, likes, file_path, file_size, upload_date";

pub(crate) fn map_image_row(row: &Row) -> Result<Image, rusqlite::Error> {
    map_image_row_with_offset(row, 0)
}

pub(crate) fn map_image_row_with_offset(
    row: &Row,
    offset: usize,
) -> Result<Image, rusqlite::Error> {
    let raw_prompt: String = row.get(offset + 3)?;

    Ok(Image {
        id: row.get(offset)?,
        filename: row.get(offset + 1)?,
        original_name: row.get(offset + 2)?,
        prompt: Prompt::new_unchecked(&raw_prompt),
        category_id: row.get(offset + 4)?,
        likes: row.get(offset + 5)?,
        file_path: row.get(offset + 6)?,
        file_size: row.get(offset + 7)?,
        upload_date: row.get(offset + 8)?,
    })
}

#[cfg(test)]
pub(crate) fn new_test_image(category_id: CategoryId, prompt: &str) -> NewImage {
    NewImage {
        filename: format!("{:x}.png", md5::compute(prompt)),
        original_name: "original.png".to_owned(),
        prompt: Prompt::new_unchecked(prompt),
        category_id,
        file_path: format!("/uploads/{:x}.png", md5::compute(prompt)),
        file_size: 2048,
    }
}
