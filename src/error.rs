//! Error types for stack-status
//!
//! Every failure is terminal for the evaluation that produced it. Nothing in
//! this crate retries; callers decide what to do based on [`Error::kind`].

use serde::Serialize;
use thiserror::Error;

/// Errors produced while locating, fetching, or folding a stack
#[derive(Debug, Error)]
pub enum Error {
    /// Root description has no `Stack from ...` footer line
    #[error("no stack footer found: expected a line starting with 'Stack from' in the description")]
    MalformedStackFooter,

    /// Footer is present but lists no `#<number>` entries
    #[error("stack footer lists no pull requests")]
    EmptyStack,

    /// Remote service reported the resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Request to the remote service failed
    #[error("fetch failed: {0}")]
    TransientFetch(String),

    /// A review event carried no reviewer identity
    #[error("review event has no reviewer identity")]
    UnattributedReview,

    /// Review state outside APPROVED / CHANGES_REQUESTED / COMMENTED
    #[error("unsupported review state '{0}'")]
    UnknownReviewState(String),

    /// CI state outside success / failure / error / pending
    #[error("unsupported CI state '{0}'")]
    UnknownCiState(String),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Config file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Repository coordinate could not be resolved
    #[error("invalid repository: {0}")]
    InvalidRepository(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for stack-status operations
pub type Result<T> = std::result::Result<T, Error>;

/// Tag identifying which kind of failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// See [`Error::MalformedStackFooter`]
    MalformedStackFooter,
    /// See [`Error::EmptyStack`]
    EmptyStack,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::TransientFetch`]
    TransientFetchError,
    /// See [`Error::UnattributedReview`]
    UnattributedReview,
    /// See [`Error::UnknownReviewState`]
    UnknownReviewState,
    /// See [`Error::UnknownCiState`]
    UnknownCiState,
    /// See [`Error::Auth`]
    Auth,
    /// See [`Error::Config`]
    Config,
    /// See [`Error::InvalidRepository`]
    InvalidRepository,
    /// See [`Error::Internal`]
    Internal,
}

impl Error {
    /// The tag for this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedStackFooter => ErrorKind::MalformedStackFooter,
            Self::EmptyStack => ErrorKind::EmptyStack,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::TransientFetch(_) => ErrorKind::TransientFetchError,
            Self::UnattributedReview => ErrorKind::UnattributedReview,
            Self::UnknownReviewState(_) => ErrorKind::UnknownReviewState,
            Self::UnknownCiState(_) => ErrorKind::UnknownCiState,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidRepository(_) => ErrorKind::InvalidRepository,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether trying again later might succeed
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransientFetch(_))
    }

    /// Whether the user has to fix something in their setup first
    pub const fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedStackFooter
                | Self::EmptyStack
                | Self::Auth(_)
                | Self::Config(_)
                | Self::InvalidRepository(_)
        )
    }

    /// Map an octocrab error, treating GitHub 404s as [`Error::NotFound`]
    pub(crate) fn from_octocrab(err: octocrab::Error, resource: &str) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                Self::NotFound(resource.to_string())
            }
            other => Self::TransientFetch(format!("{resource}: {other}")),
        }
    }
}

/// Tagged failure as presented to callers of the evaluation
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    /// Which kind of failure occurred
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
