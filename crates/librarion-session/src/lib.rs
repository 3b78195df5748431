//! Librarion Session Library
//!
//! Author: arkSong <arksong2018@gmail.com>
//! Version: 0.1.0-alpha
//!
//! Per-session browsing state and its in-memory store. Each session owns
//! one [`SessionState`] driven by a small closed set of operations; the
//! datasets themselves are read-only, so this is the only mutable state
//! in the whole system. Nothing here survives process exit.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use uuid::Uuid;

use librarion_core::{LibrarionError, Result};

/// Which page a session is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLevel {
    /// Browse mode, no book selected
    Home,

    /// A book is selected; details and optionally recommendations shown
    Detail,
}

/// Mutable per-session record.
///
/// Invariant: `page_level == Detail` implies a selected book is present.
/// Every mutating operation preserves it; entering `Detail` without a
/// title is a programming error, not a user-facing condition.
#[derive(Debug, Clone)]
pub struct SessionState {
    selected_book: Option<String>,
    page_level: PageLevel,
    recommendations_visible: bool,
    last_active: Instant,
}

impl SessionState {
    /// Fresh session: home page, nothing selected, panel collapsed.
    pub fn new() -> Self {
        Self {
            selected_book: None,
            page_level: PageLevel::Home,
            recommendations_visible: false,
            last_active: Instant::now(),
        }
    }

    /// Selects a book and enters the detail view. The recommendation
    /// panel always starts collapsed for a newly selected book.
    pub fn select_book(&mut self, title: impl Into<String>) {
        self.selected_book = Some(title.into());
        self.page_level = PageLevel::Detail;
        self.recommendations_visible = false;
        debug_assert!(self.invariant_holds());
    }

    /// Selects a title picked from the recommendation grid. Same
    /// transition as [`SessionState::select_book`]; re-enters the detail
    /// view with the new title and collapses any open panel.
    pub fn view_recommended(&mut self, title: impl Into<String>) {
        self.select_book(title);
    }

    /// Returns to the home page, clearing any selection.
    pub fn go_home(&mut self) {
        self.selected_book = None;
        self.page_level = PageLevel::Home;
        self.recommendations_visible = false;
        debug_assert!(self.invariant_holds());
    }

    /// Flips the recommendation panel and returns its new visibility.
    /// Only valid in the detail view.
    pub fn toggle_recommendations(&mut self) -> Result<bool> {
        if self.page_level != PageLevel::Detail {
            return Err(LibrarionError::InvalidState(
                "Recommendations can only be toggled from the detail view".into(),
            ));
        }
        self.recommendations_visible = !self.recommendations_visible;
        Ok(self.recommendations_visible)
    }

    /// Currently selected title, if any.
    pub fn selected_book(&self) -> Option<&str> {
        self.selected_book.as_deref()
    }

    /// Current page level.
    pub fn page_level(&self) -> PageLevel {
        self.page_level
    }

    /// Whether the recommendation panel is open.
    pub fn recommendations_visible(&self) -> bool {
        self.recommendations_visible
    }

    fn invariant_holds(&self) -> bool {
        self.page_level != PageLevel::Detail || self.selected_book.is_some()
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory store of browsing sessions keyed by session id.
///
/// Each session's state is exclusively owned by its session; the lock
/// only guards the map itself and is never held across an await point.
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SessionState>>,
    idle_timeout: Duration,
}

impl SessionManager {
    /// Creates a manager destroying sessions idle past `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Creates a fresh session and returns its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.write_sessions().insert(id, SessionState::new());
        debug!("🆕 Session {id} created");
        id
    }

    /// Runs `f` against the session's state, initializing a fresh state
    /// first if the id is unknown. The explicit initialize-if-absent
    /// check keeps a lost or expired session from ever serving without
    /// its three state fields in place.
    pub fn with_session<F, R>(&self, id: Uuid, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut sessions = self.write_sessions();
        let state = sessions.entry(id).or_insert_with(SessionState::new);
        state.touch();
        f(state)
    }

    /// Clones the session's current state, if the session exists.
    pub fn snapshot(&self, id: Uuid) -> Option<SessionState> {
        self.read_sessions().get(&id).cloned()
    }

    /// Destroys a session. Returns whether it existed.
    pub fn end(&self, id: Uuid) -> bool {
        let existed = self.write_sessions().remove(&id).is_some();
        if existed {
            debug!("🗑️ Session {id} ended");
        }
        existed
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.read_sessions().len()
    }

    /// Destroys every session idle past the configured timeout and
    /// returns how many were removed.
    pub fn sweep_idle(&self) -> usize {
        let mut sessions = self.write_sessions();
        let before = sessions.len();
        sessions.retain(|_, state| state.idle_for() < self.idle_timeout);
        before - sessions.len()
    }

    /// Spawns the periodic idle sweep. Sessions are never persisted, so
    /// this is the only lifecycle management they get.
    pub fn start_sweep_task(self: &Arc<Self>, interval: Duration) {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let swept = manager.sweep_idle();
                if swept > 0 {
                    info!("🧹 Swept {swept} idle sessions");
                }
            }
        });
    }

    fn read_sessions(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, SessionState>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_sessions(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, SessionState>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }
}
