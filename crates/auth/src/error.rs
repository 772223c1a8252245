//! Error taxonomy of the login flows

use portal_core::{CoreError, ValidationError};
use portal_http::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected locally; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure or non-2xx answer
    #[error("Transport error: {0}")]
    Transport(#[source] ClientError),

    /// Anything else that went wrong around a request
    #[error("Unexpected error: {0}")]
    Unknown(#[source] ClientError),

    /// The session store could not be read or written
    #[error("Session storage error: {0}")]
    Session(#[from] CoreError),

    /// No stored token for a call that needs one
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl From<ClientError> for AuthError {
    fn from(error: ClientError) -> Self {
        if error.is_transport() {
            Self::Transport(error)
        } else {
            Self::Unknown(error)
        }
    }
}

impl AuthError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Technical description for logs, never shown inline
    pub fn detail(&self) -> String {
        match self {
            Self::Transport(e) | Self::Unknown(e) => match e.status() {
                Some(status) => format!("Error Code: {status}\nMessage: {e}"),
                None => format!("Error: {e}"),
            },
            other => other.to_string(),
        }
    }
}
