//! Librarion Recommendation Library
//!
//! Author: arkSong <arksong2018@gmail.com>
//! Version: 0.1.0-alpha
//!
//! Ranked lookups over the precomputed book-similarity matrix. Nothing
//! here computes similarity; the matrix arrives finished from the offline
//! producer and this crate only sorts one row of it per request.
//!
//! # Examples
//! ```rust
//! use librarion_recommend::{Recommender, SimilarityMatrix};
//!
//! let matrix = SimilarityMatrix::new(
//!     vec!["A".into(), "B".into(), "C".into()],
//!     vec![
//!         vec![1.0, 0.8, 0.3],
//!         vec![0.8, 1.0, 0.5],
//!         vec![0.3, 0.5, 1.0],
//!     ],
//! )
//! .unwrap();
//!
//! let recommender = Recommender::new(matrix);
//! let similar = recommender.recommend("A").unwrap();
//! assert_eq!(similar[0].title, "B");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use librarion_core::{Config, LibrarionError, Result};

/// Maximum number of similar titles returned for one query.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Square similarity table indexed by book title on both axes.
///
/// Construction validates everything the ranking path assumes, so a
/// malformed artifact fails at startup instead of mid-request.
#[derive(Debug)]
pub struct SimilarityMatrix {
    titles: Vec<String>,
    index: HashMap<String, usize>,
    scores: Vec<Vec<f32>>,
}

/// Serialized form of the similarity artifact.
#[derive(Debug, Deserialize)]
struct RawSimilarity {
    titles: Vec<String>,
    scores: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Builds a matrix from row labels and row-major scores, rejecting
    /// non-square data, duplicate titles and non-finite scores.
    pub fn new(titles: Vec<String>, scores: Vec<Vec<f32>>) -> Result<Self> {
        if titles.is_empty() {
            return Err(LibrarionError::Artifact(
                "Similarity matrix has no titles".into(),
            ));
        }

        if scores.len() != titles.len() {
            return Err(LibrarionError::Artifact(format!(
                "Similarity matrix is not square: {} titles but {} rows",
                titles.len(),
                scores.len()
            )));
        }

        let mut index = HashMap::with_capacity(titles.len());
        for (i, title) in titles.iter().enumerate() {
            if index.insert(title.clone(), i).is_some() {
                return Err(LibrarionError::Artifact(format!(
                    "Duplicate title in similarity matrix: {title}"
                )));
            }
        }

        for (i, row) in scores.iter().enumerate() {
            if row.len() != titles.len() {
                return Err(LibrarionError::Artifact(format!(
                    "Similarity row for {} has {} columns, expected {}",
                    titles[i],
                    row.len(),
                    titles.len()
                )));
            }
            if row.iter().any(|s| !s.is_finite()) {
                return Err(LibrarionError::Artifact(format!(
                    "Non-finite similarity score in row for {}",
                    titles[i]
                )));
            }
        }

        Ok(Self {
            titles,
            index,
            scores,
        })
    }

    /// Parses the serialized artifact form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawSimilarity = serde_json::from_str(json)?;
        Self::new(raw.titles, raw.scores)
    }

    /// All row labels in column order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Whether `title` labels a row of the matrix.
    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    /// Number of books covered by the matrix.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the matrix covers no books. Construction rejects this, so
    /// it only exists to pair with [`SimilarityMatrix::len`].
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Precomputed similarity between two titles, if both are indexed.
    pub fn score(&self, a: &str, b: &str) -> Option<f32> {
        let row = *self.index.get(a)?;
        let col = *self.index.get(b)?;
        Some(self.scores[row][col])
    }
}

/// One ranked entry returned by [`Recommender::recommend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Recommended title, resolvable in the book metadata table
    pub title: String,

    /// Precomputed similarity to the query title
    pub score: f32,
}

/// Ranked-lookup service over a [`SimilarityMatrix`].
#[derive(Debug)]
pub struct Recommender {
    matrix: SimilarityMatrix,
}

impl Recommender {
    /// Wraps a validated similarity matrix.
    pub fn new(matrix: SimilarityMatrix) -> Self {
        Self { matrix }
    }

    /// The underlying matrix, used for startup integrity checks.
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Returns up to [`MAX_RECOMMENDATIONS`] titles most similar to
    /// `title`, ranked by descending score.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend_n(title, MAX_RECOMMENDATIONS)
    }

    /// Returns up to `limit` titles most similar to `title`.
    ///
    /// The full similarity row is paired with its column titles and
    /// stable-sorted by score descending, so ties keep the original
    /// column order. The query title itself is excluded by index rather
    /// than by dropping the first sorted element, which stays correct
    /// even if another title ties at the maximal score.
    pub fn recommend_n(&self, title: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let row_idx = *self
            .matrix
            .index
            .get(title)
            .ok_or_else(|| LibrarionError::book_not_found(title))?;

        let mut ranked: Vec<(usize, f32)> = self.matrix.scores[row_idx]
            .iter()
            .copied()
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let similar: Vec<Recommendation> = ranked
            .into_iter()
            .filter(|&(i, _)| i != row_idx)
            .take(limit)
            .map(|(i, score)| Recommendation {
                title: self.matrix.titles[i].clone(),
                score,
            })
            .collect();

        debug!("🔎 {} similar titles ranked for {title}", similar.len());
        Ok(similar)
    }
}

/// Loads the similarity artifact from the configured directory.
#[instrument(skip(config))]
pub fn load_matrix(config: &Config) -> Result<SimilarityMatrix> {
    let start = Instant::now();
    let matrix = load_matrix_from(&config.similarity_path())?;
    info!(
        "🔗 Loaded similarity matrix for {} books in {:?}",
        matrix.len(),
        start.elapsed()
    );
    Ok(matrix)
}

/// Loads the similarity artifact from an explicit path.
pub fn load_matrix_from(path: &Path) -> Result<SimilarityMatrix> {
    let json = fs::read_to_string(path).map_err(|e| {
        LibrarionError::Artifact(format!("Failed to read {}: {}", path.display(), e))
    })?;
    SimilarityMatrix::from_json_str(&json)
}
