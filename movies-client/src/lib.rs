//! Movie catalog core: the record model, form validation, the in-memory
//! catalog with its search filter, list rendering, and clients for the
//! `/movies` REST collection.

pub mod catalog;
pub mod client;
pub mod error;
#[cfg(feature = "http")]
pub mod http_client;
pub mod model;
pub mod render;
pub mod session;

pub use catalog::{Catalog, filter_movies};
pub use client::MoviesClientTrait;
pub use error::MoviesClientError;
#[cfg(feature = "http")]
pub use http_client::MoviesClientHttp;
pub use model::{DraftError, Movie, MovieDraft, MovieForm, MovieId};
pub use session::{CatalogError, CatalogSession};
