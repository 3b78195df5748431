//! Librarion Core Library
//!
//! Author: arkSong <arksong2018@gmail.com>
//! Version: 0.1.0-alpha
//!
//! Shared foundation for the Librarion book recommendation browser:
//! error types, configuration and the artifact record shapes used by
//! every other crate in the workspace.
//!
//! # Examples
//! ```rust
//! use librarion_core::{Config, Result};
//!
//! fn example() -> Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{LibrarionError, Result};
pub use types::{BookRecord, PopularBook};
