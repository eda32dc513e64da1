use std::path::PathBuf;

use colored::Colorize;

use crate::categorizer::Categorizer;
use crate::db::{get_connection, SqliteStore};
use crate::error::Result;
use crate::importer::{import_rows, parse_csv, resolve_user_id};
use crate::settings::{get_data_dir, load_settings};

pub fn run(file: Option<&str>, user: Option<i64>) -> Result<()> {
    let file_path = PathBuf::from(file.unwrap_or("sample.csv"));
    let rows = parse_csv(&file_path)?;
    println!("Parsed {} rows from {}", rows.len(), file_path.display());

    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let store = SqliteStore::new(&conn);

    let user_id = resolve_user_id(&store, user.or(load_settings().default_user_id))?;
    println!("Using user_id={user_id}");

    let summary = import_rows(&store, &Categorizer::default(), user_id, &rows);

    for failure in &summary.failures {
        eprintln!(
            "{} row {} ({}): {}",
            "Row failed:".red(),
            failure.row,
            failure.merchant,
            failure.reason
        );
    }

    println!(
        "Done. Inserted: {}, Skipped (dupes): {}, Failed: {}",
        summary.inserted.to_string().green(),
        summary.skipped,
        if summary.failed > 0 {
            summary.failed.to_string().red().to_string()
        } else {
            summary.failed.to_string()
        }
    );

    Ok(())
}
