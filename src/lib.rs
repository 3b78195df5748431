// =============================================================================
// Librarion Book Recommendation Browser - Library Crate
// =============================================================================
//
// Project: Librarion - High Performance Book Recommendation Browser
// Author: arkSong (arksong2018@gmail.com)
// License: Apache 2.0 / MIT
//
// Description:
//   Umbrella crate re-exporting the Librarion workspace members.
//
// =============================================================================

// Re-export common types
pub use axum;
pub use tokio;
pub use tracing;

// Re-export workspace crates
pub use librarion_api as api;
pub use librarion_catalog as catalog;
pub use librarion_core as core;
pub use librarion_recommend as recommend;
pub use librarion_session as session;
