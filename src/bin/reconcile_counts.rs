use std::error::Error;

use clap::Parser;
use rusqlite::Connection;

use promptfolio::recount_image_counts;

/// A utility that recomputes the per-category image counters from actual
/// image membership. Run this if counters have drifted, e.g. after editing
/// the database by hand.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let conn = Connection::open(&args.db_path)?;

    let corrected = recount_image_counts(&conn)?;

    if corrected == 0 {
        println!("All category counters already match image membership.");
    } else {
        println!("Corrected {corrected} category counter(s).");
    }

    Ok(())
}
