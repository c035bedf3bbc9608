//! Common error types used across the workspace.

/// Failure to parse a domain value from its wire or URL representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown VM action: {0}")]
    UnknownAction(String),

    #[error("unknown auto-shutdown action: {0}")]
    UnknownAutoShutdownAction(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),

    #[error("invalid VM id: {0}")]
    InvalidVmId(String),
}
