use thiserror::Error;

/// User-facing errors produced while parsing and dispatching a single
/// command line.
///
/// All of these are non-fatal: they are rendered to the currently active
/// stderr sink and the read loop proceeds to the next input line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    /// A redirection operator with no filename token after it.
    #[error("syntax error: `{operator}` expects a file name")]
    MissingRedirectTarget { operator: String },

    /// The name matched neither a builtin nor an executable on the search path.
    #[error("{0}: not found")]
    CommandNotFound(String),

    /// A builtin was invoked with arguments it cannot accept.
    #[error("{0}")]
    Usage(String),
}

/// Classified failure from a directory change.
///
/// Rendered by the `cd` builtin as `cd: <path>: <message>`, so the variants
/// carry only the message part.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChdirError {
    #[error("No such file or directory")]
    NotFound,

    #[error("Permission denied")]
    PermissionDenied,

    /// Anything else, reported with the underlying message.
    #[error("{0}")]
    Other(String),
}

impl ChdirError {
    /// Map an I/O error from the failed change into a tagged kind.
    pub fn classify(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ChdirError::NotFound,
            std::io::ErrorKind::PermissionDenied => ChdirError::PermissionDenied,
            _ => ChdirError::Other(err.to_string()),
        }
    }
}
