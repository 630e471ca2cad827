use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::client::{MoviesClientTrait, movie_url, movies_url};
use crate::error::MoviesClientError;
use crate::model::{Movie, MovieDraft, MovieId};

#[derive(Clone)]
pub struct MoviesClientHttp {
    client: Client,
    base_url: String,
}

impl MoviesClientHttp {
    pub fn new(endpoint: &str) -> Result<Self, MoviesClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, MoviesClientError> {
        let response = Self::ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Any non-2xx status is a failure; the body is kept verbatim as the message.
    async fn ensure_success(response: Response) -> Result<Response, MoviesClientError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(MoviesClientError::Http { status, message })
    }
}

#[async_trait(?Send)]
impl MoviesClientTrait for MoviesClientHttp {
    async fn list_movies(&self) -> Result<Vec<Movie>, MoviesClientError> {
        let request = self.client.get(movies_url(&self.base_url));
        Self::send(request).await
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, MoviesClientError> {
        let request = self.client.post(movies_url(&self.base_url)).json(draft);
        Self::send(request).await
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Movie, MoviesClientError> {
        let request = self
            .client
            .put(movie_url(&self.base_url, &movie.id))
            .json(movie);
        Self::send(request).await
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), MoviesClientError> {
        let response = self
            .client
            .delete(movie_url(&self.base_url, id))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MovieForm;
    use crate::session::CatalogSession;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        movies: Mutex<Vec<Movie>>,
        next_id: Mutex<i64>,
    }

    async fn list(api: web::Data<FakeApi>) -> HttpResponse {
        HttpResponse::Ok().json(&*api.movies.lock().unwrap())
    }

    async fn create(api: web::Data<FakeApi>, body: web::Json<serde_json::Value>) -> HttpResponse {
        let mut next_id = api.next_id.lock().unwrap();
        *next_id += 1;
        let mut record = body.into_inner();
        record["id"] = serde_json::json!(*next_id);

        let movie: Movie = serde_json::from_value(record).unwrap();
        api.movies.lock().unwrap().push(movie.clone());
        HttpResponse::Created().json(movie)
    }

    async fn replace(
        api: web::Data<FakeApi>,
        path: web::Path<String>,
        body: web::Json<Movie>,
    ) -> HttpResponse {
        let id: MovieId = path.into_inner().parse().unwrap();
        let mut movies = api.movies.lock().unwrap();
        match movies.iter_mut().find(|m| m.id == id) {
            Some(slot) => {
                *slot = body.into_inner();
                HttpResponse::Ok().json(&*slot)
            }
            None => HttpResponse::NotFound().body("Not Found"),
        }
    }

    async fn remove(api: web::Data<FakeApi>, path: web::Path<String>) -> HttpResponse {
        let id: MovieId = path.into_inner().parse().unwrap();
        let mut movies = api.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        if movies.len() == before {
            HttpResponse::NotFound().body("Not Found")
        } else {
            HttpResponse::Ok().json(serde_json::json!({}))
        }
    }

    async fn broken() -> HttpResponse {
        HttpResponse::InternalServerError().body("boom")
    }

    /// Serves a json-server lookalike on an ephemeral port.
    fn spawn_api(api: web::Data<FakeApi>, healthy: bool) -> String {
        let server = HttpServer::new(move || {
            let app = App::new().app_data(api.clone());
            if healthy {
                app.route("/movies", web::get().to(list))
                    .route("/movies", web::post().to(create))
                    .route("/movies/{id}", web::put().to(replace))
                    .route("/movies/{id}", web::delete().to(remove))
            } else {
                app.default_service(web::to(broken))
            }
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    fn seeded(movies: Vec<Movie>) -> web::Data<FakeApi> {
        let next_id = movies.len() as i64;
        web::Data::new(FakeApi {
            movies: Mutex::new(movies),
            next_id: Mutex::new(next_id),
        })
    }

    fn alien() -> Movie {
        Movie {
            id: MovieId::Number(1),
            title: "Alien".into(),
            year: 1979,
            genre: "Horror".into(),
        }
    }

    #[actix_web::test]
    async fn lists_the_collection() {
        let base = spawn_api(seeded(vec![alien()]), true);
        let client = MoviesClientHttp::new(&base).unwrap();

        assert_eq!(client.list_movies().await.unwrap(), vec![alien()]);
    }

    #[actix_web::test]
    async fn empty_collection_is_not_an_error() {
        let base = spawn_api(seeded(Vec::new()), true);
        let mut session = CatalogSession::new(MoviesClientHttp::new(&base).unwrap());

        session.load().await.unwrap();
        assert!(session.catalog().is_empty());
        assert!(session.search("").is_empty());
    }

    #[actix_web::test]
    async fn created_movie_appears_after_reload() {
        let base = spawn_api(seeded(vec![alien()]), true);
        let mut session = CatalogSession::new(MoviesClientHttp::new(&base).unwrap());
        session.load().await.unwrap();

        let created = session
            .create(&MovieForm::new(" Heat ", "1995", "Crime"))
            .await
            .unwrap();

        let reloaded = session.catalog().find(&created.id).unwrap();
        assert_eq!(reloaded.title, "Heat");
        assert_eq!(reloaded.genre, "Crime");
        assert_eq!(reloaded.year, 1995);
        assert_eq!(session.catalog().len(), 2);
    }

    #[actix_web::test]
    async fn edit_replaces_the_whole_record() {
        let base = spawn_api(seeded(vec![alien()]), true);
        let mut session = CatalogSession::new(MoviesClientHttp::new(&base).unwrap());
        session.load().await.unwrap();

        session
            .edit(&MovieId::Number(1), &MovieForm::new("Aliens", "1986", "Action"))
            .await
            .unwrap();

        let movie = session.catalog().find(&MovieId::Number(1)).unwrap();
        assert_eq!((movie.title.as_str(), movie.year, movie.genre.as_str()), ("Aliens", 1986, "Action"));
    }

    #[actix_web::test]
    async fn deleted_movie_is_gone_after_reload() {
        let base = spawn_api(seeded(vec![alien()]), true);
        let mut session = CatalogSession::new(MoviesClientHttp::new(&base).unwrap());
        session.load().await.unwrap();

        let deleted = session.delete(&MovieId::Number(1), || true).await.unwrap();

        assert!(deleted);
        assert!(session.catalog().find(&MovieId::Number(1)).is_none());
    }

    #[actix_web::test]
    async fn non_success_status_is_an_http_error() {
        let base = spawn_api(seeded(Vec::new()), false);
        let client = MoviesClientHttp::new(&base).unwrap();

        match client.list_movies().await {
            Err(MoviesClientError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn deleting_unknown_id_fails() {
        let base = spawn_api(seeded(Vec::new()), true);
        let client = MoviesClientHttp::new(&base).unwrap();

        let err = client.delete_movie(&MovieId::Number(99)).await.unwrap_err();
        assert!(matches!(err, MoviesClientError::Http { status: 404, .. }));
    }
}
