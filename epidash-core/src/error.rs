use thiserror::Error;

/// Unified error type for the epidash workspace.
///
/// This wraps data-quality problems, argument validation errors, source-tagged
/// fetch failures, and not-found conditions.
///
/// The type is `Clone` on purpose: a de-duplicated in-flight fetch shares its
/// outcome with every concurrent waiter, so the error must be broadcastable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EpidashError {
    /// Issues with the returned or expected data (unsorted series, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The data source returned an error.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Source name that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or entity could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "series for France".
        what: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl EpidashError {
    /// Helper: build a `Source` error with the source name and message.
    pub fn source(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
