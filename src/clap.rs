//! Command line interface for the Librarion server

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the current version of the crate with extra info if supplied
///
/// Set the environment variable `LIBRARION_VERSION_EXTRA` to any UTF-8
/// string to include it in parenthesis after the SemVer version. A common
/// value are git commit hashes.
pub fn version() -> String {
    let cargo_pkg_version = env!("CARGO_PKG_VERSION");

    match option_env!("LIBRARION_VERSION_EXTRA") {
        Some(x) => format!("{} ({})", cargo_pkg_version, x),
        None => cargo_pkg_version.to_owned(),
    }
}

/// Librarion - Book Recommendation Browser
///
/// Serves a browsing interface over precomputed book-recommendation
/// artifacts: metadata lookups, similarity-ranked recommendations and
/// the trending top-50 view.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[clap(about, version, name = "librarion")]
pub struct Args {
    /// Path to configuration file
    #[clap(short, long, help = "Path to configuration file", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[clap(short, long, help = "Log level override", global = true)]
    pub log_level: Option<String>,

    /// Enable verbose output
    #[clap(short, long, help = "Enable verbose output", global = true)]
    pub verbose: bool,

    /// Subcommands for different operations
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available commands for the Librarion server
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the browsing server
    Start {
        /// Server address to bind to
        #[clap(long, help = "Server address to bind to")]
        address: Option<String>,

        /// Server port to bind to
        #[clap(long, help = "Server port to bind to")]
        port: Option<u16>,
    },
}

/// Parse command line arguments into structured data
pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_format() {
        let version_str = version();

        assert!(
            version_str.contains(env!("CARGO_PKG_VERSION")),
            "Version string should contain package version"
        );
        assert!(
            version_str.chars().next().unwrap().is_ascii_digit(),
            "Version should start with a digit"
        );
    }

    #[test]
    fn test_args_parse_start_with_overrides() {
        let args = Args::parse_from([
            "librarion",
            "--config",
            "librarion.toml",
            "start",
            "--address",
            "0.0.0.0",
            "--port",
            "9090",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("librarion.toml")));
        assert_eq!(
            args.command,
            Commands::Start {
                address: Some("0.0.0.0".to_owned()),
                port: Some(9090),
            }
        );
    }

    #[test]
    fn test_args_parse_bare_start() {
        let args = Args::parse_from(["librarion", "start"]);

        assert_eq!(args.config, None);
        assert!(!args.verbose);
        assert_eq!(
            args.command,
            Commands::Start {
                address: None,
                port: None,
            }
        );
    }
}
