//! Error types for the mqtt-test-fixtures MCP server

use thiserror::Error;

/// Main error type for fixture resolution and network helpers
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error(
        "No valid build directory under {app_path}. Please build the binary via \"idf.py -B {first_candidate} build\" and run the tests again"
    )]
    NoValidBuildDirectory {
        app_path: String,
        first_candidate: String,
    },

    #[error("Multi-DUT value for '{field}' has {found} entries, expected 1 or {expected}")]
    DutCountMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("No 'IPv4 address: ' line found in DUT output")]
    DutIpNotFound,

    #[error("No IPv4 address available: {0}")]
    NoIpv4Address(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FixtureError {
    /// True for errors caused by caller-supplied parameters or missing
    /// preconditions, as opposed to host failures
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            FixtureError::NoValidBuildDirectory { .. }
                | FixtureError::DutCountMismatch { .. }
                | FixtureError::DutIpNotFound
                | FixtureError::InvalidParameter(_)
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FixtureError>;
