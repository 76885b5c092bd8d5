//! Composite retrieval: images joined with their resolved category.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryName, CategorySlug, get_category_by_slug},
    image::{Image, ImageId},
};

/// The category slug that disables filtering in gallery listings.
pub const ALL_CATEGORIES_SLUG: &str = "all";

/// An image paired with its resolved category.
///
/// A transient view produced on read; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageWithCategory {
    /// The image record.
    pub image: Image,
    /// The image's owning category, or the synthetic
    /// [unknown](Category::unknown) category if the reference is dangling.
    pub category: Category,
}

/// Retrieve images joined with their categories, optionally filtered by a
/// category slug.
///
/// - `None` or `Some("all")` returns every image.
/// - A slug that matches no category returns an empty vector, not an error:
///   an unknown category filter yields no results.
/// - An image whose `category_id` does not resolve is joined to a placeholder
///   category rather than dropped, so a broken reference degrades visibly
///   instead of hiding the image.
pub fn get_images_with_category(
    category_slug: Option<&str>,
    connection: &Connection,
) -> Result<Vec<ImageWithCategory>, Error> {
    let select = format!(
        "SELECT {IMAGE_WITH_CATEGORY_COLUMNS}
        FROM image LEFT JOIN category ON image.category_id = category.id"
    );

    match category_slug {
        None | Some(ALL_CATEGORIES_SLUG) => connection
            .prepare(&select)?
            .query_map([], map_image_with_category_row)?
            .map(|maybe_view| maybe_view.map_err(|error| error.into()))
            .collect(),
        Some(slug) => {
            let category = match get_category_by_slug(slug, connection) {
                Ok(category) => category,
                Err(Error::NotFound) => return Ok(Vec::new()),
                Err(error) => return Err(error),
            };

            connection
                .prepare(&format!("{select} WHERE image.category_id = :category_id"))?
                .query_map(&[(":category_id", &category.id)], map_image_with_category_row)?
                .map(|maybe_view| maybe_view.map_err(|error| error.into()))
                .collect()
        }
    }
}

/// Retrieve a single image joined with its category.
///
/// # Errors
/// Returns [Error::NotFound] if either the image or its referenced category
/// is missing. Unlike the list case, a dangling category reference here is
/// treated as not-found rather than degraded to a placeholder; the asymmetry
/// is the observed product behaviour and is preserved deliberately.
pub fn get_image_with_category(
    image_id: ImageId,
    connection: &Connection,
) -> Result<ImageWithCategory, Error> {
    connection
        .prepare(&format!(
            "SELECT {IMAGE_WITH_CATEGORY_COLUMNS}
            FROM image INNER JOIN category ON image.category_id = category.id
            WHERE image.id = :id"
        ))?
        .query_row(&[(":id", &image_id)], map_image_with_category_row)
        .map_err(|error| error.into())
}

const IMAGE_WITH_CATEGORY_COLUMNS: &str = "image.id, image.filename, image.original_name, \
    image.prompt, image.category_id, image.likes, image.file_path, image.file_size, \
    image.upload_date, category.id, category.name, category.slug, category.image_count";

fn map_image_with_category_row(row: &Row) -> Result<ImageWithCategory, rusqlite::Error> {
    let image = crate::image::map_image_row_with_offset(row, 0)?;

    // A NULL category ID means the LEFT JOIN found no owning category.
    let category = match row.get::<_, Option<i64>>(9)? {
        Some(id) => {
            let raw_name: String = row.get(10)?;
            let raw_slug: String = row.get(11)?;

            Category {
                id,
                name: CategoryName::new_unchecked(&raw_name),
                slug: CategorySlug::new_unchecked(&raw_slug),
                image_count: row.get(12)?,
            }
        }
        None => {
            tracing::warn!(
                "image {} references missing category {}",
                image.id,
                image.category_id
            );
            Category::unknown()
        }
    };

    Ok(ImageWithCategory { image, category })
}


#[cfg(test)]
mod get_image_with_category_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, CategorySlug, create_category},
        db::initialize,
        image::{new_test_image, upload_image},
    };

    use super::get_image_with_category;

    fn get_test_db_connection() -> (Connection, crate::category::Category) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");

        let category = create_category(
            CategoryName::new_unchecked("Photography"),
            CategorySlug::new_unchecked("photography"),
            &connection,
        )
        .unwrap();

        (connection, category)
    }

    #[test]
    fn returns_joined_view_with_identical_fields() {
        let (connection, category) = get_test_db_connection();
        let image = upload_image(new_test_image(category.id, "a cat"), &connection).unwrap();

        let view = get_image_with_category(image.id, &connection).expect("Could not get view");

        assert_eq!(view.image.prompt.as_ref(), "a cat");
        assert_eq!(view.image.category_id, category.id);
        assert_eq!(view.image.likes, 0);
        assert_eq!(view.category.slug, category.slug);
    }

    #[test]
    fn missing_image_returns_not_found() {
        let (connection, _) = get_test_db_connection();

        assert_eq!(
            get_image_with_category(999, &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn dangling_category_reference_returns_not_found() {
        let (connection, category) = get_test_db_connection();
        let image = upload_image(new_test_image(category.id, "a cat"), &connection).unwrap();

        // Foreign key enforcement must be suspended for the corrupting
        // UPDATE to land.
        connection
            .pragma_update(None, "foreign_keys", "OFF")
            .unwrap();
        connection
            .execute("UPDATE image SET category_id = 9999 WHERE id = ?1", [image.id])
            .unwrap();
        connection
            .pragma_update(None, "foreign_keys", "ON")
            .unwrap();

        // Deliberately asymmetric with the list case, which degrades to a
        // placeholder instead.
        assert_eq!(
            get_image_with_category(image.id, &connection),
            Err(Error::NotFound)
        );
    }
}
