//! Database schema initialization.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, category::create_category_table, image::create_image_table};

/// Create the application's tables if they do not exist.
///
/// The tables are created inside an exclusive transaction so that two server
/// processes pointed at the same file cannot interleave schema creation.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_image_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_schema_on_empty_database() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(Ok(()), initialize(&connection));

        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(1) FROM sqlite_master WHERE type = 'table' \
                AND name IN ('category', 'image')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 2);
    }

    #[test]
    fn is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(Ok(()), initialize(&connection));
        assert_eq!(Ok(()), initialize(&connection));
    }
}
