//! Core data types for Librarion
//!
//! The record shapes of the precomputed artifacts. All of these are
//! immutable after load; nothing in the serving path ever mutates them.

use serde::{Deserialize, Serialize};

/// One row of the book metadata table. The title is the unique key across
/// every dataset in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title, primary key
    pub title: String,

    /// Author name
    pub author: String,

    /// Year of publication
    pub year: i32,

    /// Publisher name
    pub publisher: String,

    /// Cover image URL
    pub cover_url: String,

    /// Average reader rating
    pub rating: f64,
}

/// One entry of the precomputed top-50 popularity list. Rank is implied by
/// position in the list; the producer's order is never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularBook {
    /// Book title, resolvable in the metadata table
    pub title: String,

    /// Rating shown on the trending view
    pub rating: f64,
}
