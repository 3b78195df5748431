//! Librarion API Library
//!
//! Author: arkSong <arksong2018@gmail.com>
//! Version: 0.1.0-alpha
//!
//! The hosting surface of the Librarion book recommendation browser: an
//! axum router serving the two-tab HTML interface (Explore and
//! Trending), the form-post actions that drive the per-session state
//! machine, and a JSON health endpoint. All page rendering is an
//! explicit function of session state plus the read-only artifacts;
//! there is no hidden control flow.

pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
