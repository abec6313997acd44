use thiserror::Error;

/// Errors returned by [`crate::OctoboxClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0:?}")]
    InvalidUrl(String),

    #[error("api token is not a valid header value")]
    InvalidToken,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("decode {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status code for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
