use std::fmt;

/// Errors surfaced to callers of the report generators.
///
/// Layout overflow and asset decode failures are handled internally (the
/// affected content degrades and the condition is logged); only input
/// validation and final assembly can fail a generation call.
#[derive(Debug)]
pub enum Error {
    /// A mandatory domain field required for the cover or metadata block
    /// is missing or empty.
    Validation(String),
    /// Serializing the finished pages to bytes failed.
    Assembly(String),
    /// File boundary error (CLI input/output).
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "invalid report data: {msg}"),
            Error::Assembly(msg) => write!(f, "PDF assembly failed: {msg}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
