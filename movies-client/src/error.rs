use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoviesClientError {
    #[cfg(feature = "http")]
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
