//! Librarion Catalog Library
//!
//! Author: arkSong <arksong2018@gmail.com>
//! Version: 0.1.0-alpha
//!
//! The catalog is the in-memory face of the precomputed artifact store:
//! the title-keyed book metadata table and the top-50 popularity list.
//! Both are loaded once at startup and never mutated afterwards, so the
//! whole structure can be shared across sessions without locking.

use std::collections::HashMap;

use tracing::debug;

use librarion_core::{BookRecord, LibrarionError, PopularBook, Result};

pub mod artifacts;

/// Required length of the popularity list. The offline producer ranks
/// exactly this many books; anything else is a corrupt artifact.
pub const POPULAR_LIST_LEN: usize = 50;

/// Title-keyed book metadata table plus the fixed popularity ranking.
#[derive(Debug)]
pub struct Catalog {
    books: Vec<BookRecord>,
    index: HashMap<String, usize>,
    popular: Vec<PopularBook>,
}

impl Catalog {
    /// Assembles a catalog from loaded artifacts, validating the invariants
    /// the serving path relies on: unique titles, a popularity list of
    /// exactly [`POPULAR_LIST_LEN`] entries, and every popular title
    /// resolvable in the metadata table.
    pub fn new(books: Vec<BookRecord>, popular: Vec<PopularBook>) -> Result<Self> {
        let mut index = HashMap::with_capacity(books.len());
        for (i, book) in books.iter().enumerate() {
            if index.insert(book.title.clone(), i).is_some() {
                return Err(LibrarionError::Artifact(format!(
                    "Duplicate title in book metadata: {}",
                    book.title
                )));
            }
        }

        if popular.len() != POPULAR_LIST_LEN {
            return Err(LibrarionError::Artifact(format!(
                "Popularity list must contain exactly {} entries, found {}",
                POPULAR_LIST_LEN,
                popular.len()
            )));
        }

        for entry in &popular {
            if !index.contains_key(&entry.title) {
                return Err(LibrarionError::Artifact(format!(
                    "Popularity list references a title with no metadata row: {}",
                    entry.title
                )));
            }
        }

        debug!(
            "📚 Catalog assembled: {} books, {} trending entries",
            books.len(),
            popular.len()
        );

        Ok(Self {
            books,
            index,
            popular,
        })
    }

    /// Fetches the metadata row for `title`.
    ///
    /// Callers only ever pass titles obtained from the picker, the
    /// recommender or the popularity list, all of which are valid keys;
    /// a miss is therefore a data-integrity fault, checked defensively.
    pub fn book_details(&self, title: &str) -> Result<&BookRecord> {
        self.index
            .get(title)
            .map(|&i| &self.books[i])
            .ok_or_else(|| LibrarionError::book_not_found(title))
    }

    /// Whether `title` has a metadata row.
    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    /// All titles in table order, for the selection picker.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|b| b.title.as_str())
    }

    /// The popularity list in producer rank order. Never reordered.
    pub fn popular_books(&self) -> &[PopularBook] {
        &self.popular
    }

    /// Number of books in the metadata table.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the metadata table is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
