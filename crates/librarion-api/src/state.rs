//! Shared application state for the Librarion HTTP surface
//!
//! The three collaborators of every handler: the catalog, the
//! recommender and the session store. Artifacts are read-only after
//! load, so the whole bundle is cheaply cloneable behind `Arc`s.

use std::sync::Arc;

use tracing::info;

use librarion_catalog::Catalog;
use librarion_core::{LibrarionError, Result};
use librarion_recommend::{Recommender, SimilarityMatrix};
use librarion_session::SessionManager;

/// Handler state shared across all sessions.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Book metadata table and popularity list
    pub catalog: Arc<Catalog>,

    /// Similarity-ranked lookup service
    pub recommender: Arc<Recommender>,

    /// Per-session browsing state store
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Bundles the loaded services after verifying the cross-dataset
    /// invariant: every title indexed by the similarity matrix must have
    /// a metadata row. Violations abort startup; serving would only
    /// defer the failure to some unlucky request.
    pub fn new(
        catalog: Catalog,
        recommender: Recommender,
        sessions: SessionManager,
    ) -> Result<Self> {
        verify_integrity(&catalog, recommender.matrix())?;
        info!(
            "🔒 Artifact integrity verified: {} books, {} similarity rows",
            catalog.len(),
            recommender.matrix().len()
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            recommender: Arc::new(recommender),
            sessions: Arc::new(sessions),
        })
    }
}

/// Checks that every similarity-matrix title resolves in the catalog.
/// The popularity list was already validated by [`Catalog::new`].
pub fn verify_integrity(catalog: &Catalog, matrix: &SimilarityMatrix) -> Result<()> {
    for title in matrix.titles() {
        if !catalog.contains(title) {
            return Err(LibrarionError::Artifact(format!(
                "Similarity matrix references a title with no metadata row: {title}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use test_log::test;

    use librarion_catalog::POPULAR_LIST_LEN;
    use librarion_core::{BookRecord, PopularBook};

    fn book(title: &str) -> BookRecord {
        BookRecord {
            title: title.to_owned(),
            author: "Author".to_owned(),
            year: 2000,
            publisher: "Press".to_owned(),
            cover_url: "http://covers.example.com/x.jpg".to_owned(),
            rating: 4.0,
        }
    }

    fn fixture_catalog(titles: &[String]) -> Catalog {
        let books: Vec<BookRecord> = titles.iter().map(|t| book(t)).collect();
        let popular: Vec<PopularBook> = titles
            .iter()
            .take(POPULAR_LIST_LEN)
            .map(|t| PopularBook {
                title: t.clone(),
                rating: 4.0,
            })
            .collect();
        Catalog::new(books, popular).unwrap()
    }

    fn identity_matrix(titles: Vec<String>) -> SimilarityMatrix {
        let n = titles.len();
        let scores: Vec<Vec<f32>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.5 }).collect())
            .collect();
        SimilarityMatrix::new(titles, scores).unwrap()
    }

    #[test]
    fn test_state_accepts_consistent_artifacts() {
        let titles: Vec<String> = (0..POPULAR_LIST_LEN).map(|i| format!("Book {i:02}")).collect();
        let state = AppState::new(
            fixture_catalog(&titles),
            Recommender::new(identity_matrix(titles)),
            SessionManager::new(Duration::from_secs(3600)),
        );
        assert!(state.is_ok());
    }

    #[test]
    fn test_state_rejects_matrix_title_without_metadata_row() {
        let titles: Vec<String> = (0..POPULAR_LIST_LEN).map(|i| format!("Book {i:02}")).collect();
        let mut matrix_titles = titles.clone();
        matrix_titles[3] = "Phantom Title".to_owned();

        let err = AppState::new(
            fixture_catalog(&titles),
            Recommender::new(identity_matrix(matrix_titles)),
            SessionManager::new(Duration::from_secs(3600)),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Phantom Title"));
    }
}
