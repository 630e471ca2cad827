use async_trait::async_trait;

use crate::error::MoviesClientError;
use crate::model::{Movie, MovieDraft, MovieId};

/// The REST collection at `{base}/movies`.
///
/// Futures are not required to be `Send` so browser fetch implementations
/// fit the same trait.
#[async_trait(?Send)]
pub trait MoviesClientTrait {
    async fn list_movies(&self) -> Result<Vec<Movie>, MoviesClientError>;
    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, MoviesClientError>;
    /// Full replace (`PUT`) of the record with `movie.id`.
    async fn update_movie(&self, movie: &Movie) -> Result<Movie, MoviesClientError>;
    async fn delete_movie(&self, id: &MovieId) -> Result<(), MoviesClientError>;
}

pub fn movies_url(base_url: &str) -> String {
    format!("{}/movies", base_url.trim_end_matches('/'))
}

/// Item URL. Text ids are percent-encoded so an id is always exactly one
/// path segment.
pub fn movie_url(base_url: &str, id: &MovieId) -> String {
    format!("{}/{}", movies_url(base_url), encode_segment(&id.to_string()))
}

fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
