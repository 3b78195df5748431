//! Artifact loading for the catalog datasets
//!
//! The offline producer serializes its outputs as JSON: `books.json`
//! (array of metadata rows) and `top_books.json` (array of ranked
//! title/rating pairs). Files are read once at startup; parse or shape
//! failures abort startup rather than serving wrong data.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument};

use librarion_core::{BookRecord, Config, LibrarionError, PopularBook, Result};

use crate::Catalog;

/// Parses the book metadata artifact.
pub fn parse_books(json: &str) -> Result<Vec<BookRecord>> {
    let books: Vec<BookRecord> = serde_json::from_str(json)?;
    if books.is_empty() {
        return Err(LibrarionError::Artifact(
            "Book metadata table is empty".into(),
        ));
    }
    Ok(books)
}

/// Parses the popularity list artifact. Length is validated later by
/// [`Catalog::new`] together with the cross-table checks.
pub fn parse_popular(json: &str) -> Result<Vec<PopularBook>> {
    Ok(serde_json::from_str(json)?)
}

fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        LibrarionError::Artifact(format!("Failed to read {}: {}", path.display(), e))
    })
}

/// Loads and assembles the catalog from the configured artifact directory.
#[instrument(skip(config))]
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    let start = Instant::now();

    let books = parse_books(&read_artifact(&config.books_path())?)?;
    let popular = parse_popular(&read_artifact(&config.popular_path())?)?;
    let catalog = Catalog::new(books, popular)?;

    info!(
        "📚 Loaded catalog with {} books in {:?}",
        catalog.len(),
        start.elapsed()
    );
    Ok(catalog)
}
