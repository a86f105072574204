//! Domain-level error taxonomy for stipple.

/// Errors produced while validating or decoding a contribution-graph
/// document.
///
/// Every variant carries the full diagnostic in its display string; these
/// strings are the only troubleshooting signal a user gets for a mismatched
/// source document, so they are kept stable and specific.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("malformed document")]
    MalformedDocument(#[source] roxmltree::Error),

    #[error("expected {expected}, got {actual}")]
    UnexpectedRootTag {
        expected: &'static str,
        actual: String,
    },

    #[error("expected class {expected}, got {actual}")]
    UnexpectedRootClass {
        expected: &'static str,
        actual: String,
    },

    #[error("too few data points in graph: {found} < {min}")]
    TooFewDataPoints { found: usize, min: usize },

    #[error("day cell missing required attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("invalid value for attribute {attr}: {value}")]
    InvalidAttribute { attr: &'static str, value: String },
}

/// Errors produced while fetching the source document.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote answered, but with a non-success status.
    #[error("remote returned status {0}")]
    Status(u16),

    /// The request never completed (DNS, TLS, connection reset, ...).
    #[error("connection failed: {0}")]
    Connection(String),
}

/// stipple domain errors.
#[derive(Debug, thiserror::Error)]
pub enum StippleError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("git error: {0}")]
    Git(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for stipple domain operations.
pub type Result<T> = std::result::Result<T, StippleError>;
