use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use movies_client::client::{movie_url, movies_url};
use movies_client::{Movie, MovieDraft, MovieId, MoviesClientError, MoviesClientTrait};
use serde::de::DeserializeOwned;

/// `fetch`-backed client for the browser build.
#[derive(Clone, PartialEq)]
pub struct MoviesClientGloo {
    base_url: String,
}

impl MoviesClientGloo {
    pub fn new(endpoint: &str) -> Self {
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
        }
    }

    async fn send<T: DeserializeOwned>(request: Request) -> Result<T, MoviesClientError> {
        let response = request.send().await.map_err(transport)?;
        let response = ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|e| MoviesClientError::InvalidResponse(e.to_string()))
    }

    fn with_json<B: serde::Serialize>(
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Request, MoviesClientError> {
        builder
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(transport)
    }
}

fn transport(err: gloo_net::Error) -> MoviesClientError {
    MoviesClientError::Transport(err.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, MoviesClientError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    Err(MoviesClientError::Http { status, message })
}

#[async_trait(?Send)]
impl MoviesClientTrait for MoviesClientGloo {
    async fn list_movies(&self) -> Result<Vec<Movie>, MoviesClientError> {
        let request = Request::get(&movies_url(&self.base_url))
            .header("Accept", "application/json")
            .build()
            .map_err(transport)?;
        Self::send(request).await
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, MoviesClientError> {
        let request = Self::with_json(Request::post(&movies_url(&self.base_url)), draft)?;
        Self::send(request).await
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Movie, MoviesClientError> {
        let request = Self::with_json(Request::put(&movie_url(&self.base_url, &movie.id)), movie)?;
        Self::send(request).await
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), MoviesClientError> {
        let response = Request::delete(&movie_url(&self.base_url, id))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}
