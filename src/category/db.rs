//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, CategorySlug},
};

/// Create a category with an image count of zero and return it with its
/// generated ID.
///
/// # Errors
/// Returns [Error::DuplicateSlug] or [Error::DuplicateCategoryName] if a
/// category with the same slug or name already exists.
pub fn create_category(
    name: CategoryName,
    slug: CategorySlug,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, slug, image_count) VALUES (?1, ?2, 0);",
        (name.as_ref(), slug.as_ref()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        slug,
        image_count: 0,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, slug, image_count FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single category by its slug.
///
/// Lookup is exact-match: slugs are stored lowercase and compared as stored.
pub fn get_category_by_slug(slug: &str, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, slug, image_count FROM category WHERE slug = :slug;")?
        .query_row(&[(":slug", &slug)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, slug, image_count FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Add `delta` (positive or negative) to a category's image count.
///
/// The adjustment is a single UPDATE statement, so each individual counter
/// change is atomic at the storage layer. If the category does not exist the
/// adjustment is a logged no-op rather than an error: the counter can
/// legitimately race a future category-removal path and must not crash.
pub fn adjust_image_count(
    category_id: CategoryId,
    delta: i64,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET image_count = image_count + ?1 WHERE id = ?2",
        (delta, category_id),
    )?;

    if rows_affected == 0 {
        tracing::warn!(
            "skipped image count adjustment of {delta} for missing category {category_id}"
        );
    }

    Ok(())
}

/// Recompute every category's image count from actual image membership.
///
/// Compensation for counter drift: the upload/delete paths keep the counter
/// in step incrementally, but nothing stops an operator from editing the
/// database by hand. Returns the number of categories whose counter changed.
pub fn recount_image_counts(connection: &Connection) -> Result<usize, Error> {
    let rows_affected = connection.execute(
        "UPDATE category
        SET image_count = (SELECT COUNT(1) FROM image WHERE image.category_id = category.id)
        WHERE image_count <> (SELECT COUNT(1) FROM image WHERE image.category_id = category.id)",
        (),
    )?;

    Ok(rows_affected)
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            slug TEXT NOT NULL UNIQUE,
            image_count INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_category_slug ON category(slug);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_slug: String = row.get(2)?;
    let image_count = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        slug: CategorySlug::new_unchecked(&raw_slug),
        image_count,
    })
}


#[cfg(test)]
mod recount_image_counts_tests {
    use rusqlite::Connection;

    use crate::{
        category::{CategoryName, CategorySlug, create_category, get_category},
        db::initialize,
        image::{NewImage, Prompt, insert_image},
    };

    use super::recount_image_counts;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    #[test]
    fn recount_fixes_drifted_counter() {
        let connection = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Abstract"),
            CategorySlug::new_unchecked("abstract"),
            &connection,
        )
        .unwrap();

        // Insert images without touching the counter to simulate drift.
        for n in 0..3 {
            insert_image(
                NewImage {
                    filename: format!("{n}.png"),
                    original_name: format!("original-{n}.png"),
                    prompt: Prompt::new_unchecked("a drifting counter"),
                    category_id: category.id,
                    file_path: format!("/uploads/{n}.png"),
                    file_size: 1024,
                },
                &connection,
            )
            .expect("Could not insert test image");
        }

        let changed = recount_image_counts(&connection).expect("Could not recount");

        assert_eq!(changed, 1);
        let got = get_category(category.id, &connection).unwrap();
        assert_eq!(got.image_count, 3);
    }

    #[test]
    fn recount_leaves_consistent_counters_alone() {
        let connection = get_test_db_connection();
        create_category(
            CategoryName::new_unchecked("Abstract"),
            CategorySlug::new_unchecked("abstract"),
            &connection,
        )
        .unwrap();

        let changed = recount_image_counts(&connection).expect("Could not recount");

        assert_eq!(changed, 0);
    }
}
