//! Request handlers for the Librarion interface
//!
//! Page handlers render from session state; action handlers mutate it
//! through the state machine and answer with a redirect back to the
//! Explore page (post/redirect/get). Sessions attach through an
//! HttpOnly cookie created lazily on first contact.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use librarion_core::{LibrarionError, Result};
use librarion_session::PageLevel;

use crate::state::AppState;
use crate::views;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "librarion_sid";

/// Error wrapper mapping Librarion faults onto HTTP responses.
///
/// `NotFound` and `InvalidState` are integrity faults with no recovery
/// path; they are logged and surfaced with a visible body rather than
/// swallowed into a blank page.
#[derive(Debug)]
pub struct ApiError(pub LibrarionError);

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl From<LibrarionError> for ApiError {
    fn from(err: LibrarionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            LibrarionError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("❌ Request failed: {}", self.0);

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Server status
    pub status: String,

    /// Server version
    pub version: String,

    /// Number of books served
    pub books: usize,
}

/// Form body carrying a book title.
#[derive(Debug, Deserialize)]
pub struct TitleForm {
    /// Title of the book the action applies to
    pub title: String,
}

/// Extracts the session id from the request's cookie header.
fn session_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value).ok()
        } else {
            None
        }
    })
}

/// Returns the request's session id, creating a session when the
/// request carries none. The bool reports whether a cookie must be set.
fn establish_session(state: &AppState, headers: &HeaderMap) -> (Uuid, bool) {
    match session_from_headers(headers) {
        Some(id) => (id, false),
        None => (state.sessions.create(), true),
    }
}

fn attach_session_cookie(mut response: Response, id: Uuid) -> Response {
    if let Ok(value) =
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly"))
    {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

fn back_to_explore(fresh: bool, id: Uuid) -> Response {
    let response = Redirect::to("/explore").into_response();
    if fresh {
        attach_session_cookie(response, id)
    } else {
        response
    }
}

/// Root handler, Explore is the landing tab.
pub async fn index() -> Redirect {
    Redirect::to("/explore")
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        books: state.catalog.len(),
    };

    (StatusCode::OK, Json(response))
}

/// Explore tab: picker in browse mode, detail panel once a book is
/// selected, recommendation grid when the panel is open.
pub async fn explore(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Response, ApiError> {
    let (id, fresh) = establish_session(&state, &headers);
    let session = state.sessions.with_session(id, |s| s.clone());

    let page = match session.page_level() {
        PageLevel::Home => views::explore_home(state.catalog.titles()),
        PageLevel::Detail => {
            // The state machine guarantees a selection in Detail; a miss
            // here is a programming error and must fail loudly.
            let title = session.selected_book().ok_or_else(|| {
                LibrarionError::InvalidState("Detail view with no selected book".into())
            })?;
            let record = state.catalog.book_details(title)?;

            if session.recommendations_visible() {
                let similar = state.recommender.recommend(title)?;
                let cards: Result<Vec<_>> = similar
                    .iter()
                    .map(|r| state.catalog.book_details(&r.title))
                    .collect();
                views::book_detail(record, true, &cards?)
            } else {
                views::book_detail(record, false, &[])
            }
        }
    };

    let response = Html(page).into_response();
    Ok(if fresh {
        attach_session_cookie(response, id)
    } else {
        response
    })
}

/// Trending tab: the top-50 list in precomputed rank order.
pub async fn trending(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Response, ApiError> {
    let (id, fresh) = establish_session(&state, &headers);

    let entries: Result<Vec<_>> = state
        .catalog
        .popular_books()
        .iter()
        .map(|popular| {
            state
                .catalog
                .book_details(&popular.title)
                .map(|record| (popular, record))
        })
        .collect();

    let response = Html(views::trending(&entries?)).into_response();
    Ok(if fresh {
        attach_session_cookie(response, id)
    } else {
        response
    })
}

/// Book selection from the picker.
pub async fn select_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TitleForm>,
) -> std::result::Result<Response, ApiError> {
    let (id, fresh) = establish_session(&state, &headers);

    // Validate before mutating so a bad title never enters the session.
    state.catalog.book_details(&form.title)?;
    state
        .sessions
        .with_session(id, |s| s.select_book(&form.title));

    info!("📖 Session {id} selected {}", form.title);
    Ok(back_to_explore(fresh, id))
}

/// Book selection from a recommendation card.
pub async fn view_recommended(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TitleForm>,
) -> std::result::Result<Response, ApiError> {
    let (id, fresh) = establish_session(&state, &headers);

    state.catalog.book_details(&form.title)?;
    state
        .sessions
        .with_session(id, |s| s.view_recommended(&form.title));

    info!("📖 Session {id} viewed recommendation {}", form.title);
    Ok(back_to_explore(fresh, id))
}

/// Home reset.
pub async fn go_home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Response, ApiError> {
    let (id, fresh) = establish_session(&state, &headers);
    state.sessions.with_session(id, |s| s.go_home());
    Ok(back_to_explore(fresh, id))
}

/// Recommendation panel toggle.
pub async fn toggle_recommendations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Response, ApiError> {
    let (id, fresh) = establish_session(&state, &headers);
    state
        .sessions
        .with_session(id, |s| s.toggle_recommendations())?;
    Ok(back_to_explore(fresh, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_session_from_headers_parses_cookie() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("other=1; {SESSION_COOKIE}={id}; theme=dark")).unwrap(),
        );

        assert_eq!(session_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_session_from_headers_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("librarion_sid=not-a-uuid"),
        );
        assert_eq!(session_from_headers(&headers), None);

        assert_eq!(session_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_api_error_status_mapping() {
        let not_found = ApiError(LibrarionError::book_not_found("X"));
        assert_eq!(
            not_found.into_response().status(),
            StatusCode::NOT_FOUND
        );

        let invalid = ApiError(LibrarionError::InvalidState("boom".into()));
        assert_eq!(
            invalid.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
