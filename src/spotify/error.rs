use hyper::StatusCode;
use thiserror::Error;

/// The request never produced an HTTP response (connect, timeout, body read).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("malformed token response: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("token lifetime out of range: {0}s")]
    InvalidLifetime(i64),
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("could not obtain a Spotify token: {0}")]
    Auth(#[from] AuthError),
    #[error("search request failed: {0}")]
    Transport(#[source] TransportError),
    #[error("search endpoint returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("malformed search response: {0}")]
    Malformed(#[source] serde_json::Error),
}
