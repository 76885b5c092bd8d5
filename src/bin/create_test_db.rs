use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use promptfolio::{CategoryName, CategorySlug, NewImage, Prompt, create_category, initialize_db, upload_image};

/// A utility for creating a test database for the promptfolio web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test categories and images...");

    let photography = create_category(
        CategoryName::new("Photography")?,
        CategorySlug::new("photography")?,
        &conn,
    )?;
    let abstract_art = create_category(
        CategoryName::new("Abstract")?,
        CategorySlug::new("abstract")?,
        &conn,
    )?;
    create_category(
        CategoryName::new("Portraits")?,
        CategorySlug::new("portraits")?,
        &conn,
    )?;

    let seed_images = [
        (
            photography.id,
            "a red fox trotting through fresh snow, golden hour, 85mm",
            "fox.png",
        ),
        (
            photography.id,
            "storm clouds over a wheat field, dramatic lighting",
            "storm.png",
        ),
        (
            abstract_art.id,
            "iridescent ink swirls on black glass, macro",
            "swirls.png",
        ),
    ];

    for (category_id, prompt, original_name) in seed_images {
        upload_image(
            NewImage {
                filename: original_name.to_owned(),
                original_name: original_name.to_owned(),
                prompt: Prompt::new(prompt)?,
                category_id,
                file_path: format!("/uploads/{original_name}"),
                file_size: 1024,
            },
            &conn,
        )?;
    }

    println!("Note: the seeded image records have no files on disk, so thumbnails will 404.");
    println!("Success!");

    Ok(())
}
