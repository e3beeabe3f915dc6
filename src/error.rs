//! Error taxonomy shared by every Spotufy component.
//!
//! All failures are values: each operation returns [`Result`] and a caller
//! composing operations checks every step before issuing the next dependent
//! call. Variants describe the *kind* of failure so that a presentation layer
//! can decide what to show without inspecting messages.
//!
//! | Kind              | Raised when                                               | Retry? |
//! |-------------------|-----------------------------------------------------------|--------|
//! | `ConfigMissing`   | a required secret or setting is absent                     | no     |
//! | `AuthRejected`    | the token endpoint refused the grant                      | new input |
//! | `Unauthorized`    | credential lacks scope, expired, or remote replied 401/403 | re-auth |
//! | `InvalidInput`    | a precondition failed before any network call             | fix input |
//! | `NotFound`        | the remote answered, but nothing matched                  | no     |
//! | `Transport`       | network error, timeout, or unclassified non-2xx reply      | caller |
//! | `PartialFailure`  | a playlist was created but could not be populated          | no     |
//! | `Io`              | local file or socket failure (credential cache, callback)  | no     |

use thiserror::Error;

use crate::types::PlaylistHandle;

/// Standard result type for Spotufy operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    #[error("authorization rejected: {0}")]
    AuthRejected(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Network-level failure (`status` is `None`) or a non-2xx reply that no
    /// other variant covers.
    #[error("transport failure{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Local I/O: the credential cache or the callback listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The playlist container exists remotely but filling it failed. No
    /// compensating delete is attempted.
    #[error("playlist {} was created but tracks could not be added: {source}", playlist.external_url)]
    PartialFailure {
        playlist: PlaylistHandle,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// A precondition failed; nothing was sent.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// The remote answered but nothing matched.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Missing scope, expired credential, or a 401/403 reply.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    /// Network failure (`status` is `None`) or an unclassified non-2xx reply.
    pub fn transport(status: Option<u16>, msg: impl Into<String>) -> Self {
        Error::Transport {
            status,
            message: msg.into(),
        }
    }

    /// HTTP status of a classified transport failure, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Callers that only distinguish "succeeded vs. did not" treat a transport
    /// failure the same as an empty result.
    #[must_use]
    pub fn is_not_found_like(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Transport { .. })
    }

    /// The link of a playlist left behind by a partially failed build.
    #[must_use]
    pub fn orphaned_playlist(&self) -> Option<&PlaylistHandle> {
        match self {
            Error::PartialFailure { playlist, .. } => Some(playlist),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport {
            status: None,
            message: format!("unexpected response shape: {err}"),
        }
    }
}
