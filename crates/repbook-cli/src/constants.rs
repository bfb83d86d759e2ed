//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure, including a declined confirmation.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, plan, exercise, history entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;
}

/// Environment variables read by the CLI.
pub mod env {
    pub const CONFIG: &str = "REPBOOK_CONFIG";
    pub const STORE: &str = "REPBOOK_STORE";
    pub const LOG: &str = "REPBOOK_LOG";
}

/// Directory name under the XDG config and data homes.
pub const APP_DIR: &str = "repbook";

/// Store file name inside the data directory.
pub const STORE_FILE: &str = "repbook.db";

/// Log filter used when `REPBOOK_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";
