//! Route table for the Librarion interface

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/explore", get(handlers::explore))
        .route("/trending", get(handlers::trending))
        // Session actions
        .route("/books/select", post(handlers::select_book))
        .route("/books/view", post(handlers::view_recommended))
        .route("/session/home", post(handlers::go_home))
        .route("/session/recommendations", post(handlers::toggle_recommendations))
        // Operational
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use librarion_catalog::{Catalog, POPULAR_LIST_LEN};
    use librarion_core::{BookRecord, PopularBook};
    use librarion_recommend::{Recommender, SimilarityMatrix};
    use librarion_session::SessionManager;

    fn fixture_state() -> AppState {
        let titles: Vec<String> = (0..POPULAR_LIST_LEN)
            .map(|i| format!("Book {i:02}"))
            .collect();

        let books: Vec<BookRecord> = titles
            .iter()
            .map(|t| BookRecord {
                title: t.clone(),
                author: format!("{t} Author"),
                year: 2001,
                publisher: "Test Press".to_owned(),
                cover_url: format!("http://covers.example.com/{t}.jpg"),
                rating: 4.0,
            })
            .collect();
        let popular: Vec<PopularBook> = titles
            .iter()
            .map(|t| PopularBook {
                title: t.clone(),
                rating: 4.5,
            })
            .collect();

        let n = titles.len();
        let scores: Vec<Vec<f32>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 1.0 } else { 0.5 })
                    .collect()
            })
            .collect();

        AppState::new(
            Catalog::new(books, popular).unwrap(),
            Recommender::new(SimilarityMatrix::new(titles, scores).unwrap()),
            SessionManager::new(Duration::from_secs(3600)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(fixture_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_redirects_to_explore() {
        let app = create_router(fixture_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/explore");
    }

    #[tokio::test]
    async fn test_explore_serves_picker_and_session_cookie() {
        let app = create_router(fixture_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/explore")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.starts_with("librarion_sid="));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_router(fixture_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
