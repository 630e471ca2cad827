use crate::model::{Movie, MovieId};

/// In-memory snapshot of the movie collection.
///
/// Only ever replaced wholesale with a fresh listing from the API; searches
/// run against it without touching the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn replace(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn into_movies(self) -> Vec<Movie> {
        self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<&Movie> {
        filter_movies(&self.movies, query)
    }
}

/// Case-insensitive substring match on title or genre. A blank query keeps
/// everything.
pub fn filter_movies<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return movies.iter().collect();
    }

    movies
        .iter()
        .filter(|m| {
            m.title.to_lowercase().contains(&term) || m.genre.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str, year: i32, genre: &str) -> Movie {
        Movie {
            id: MovieId::Number(id),
            title: title.into(),
            year,
            genre: genre.into(),
        }
    }

    fn sample() -> Catalog {
        Catalog::from_movies(vec![
            movie(1, "Alien", 1979, "Horror"),
            movie(2, "Heat", 1995, "Crime"),
            movie(3, "The Thing", 1982, "Horror"),
        ])
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let catalog = sample();
        let titles: Vec<_> = catalog.search("   ").iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Alien", "Heat", "The Thing"]);
    }

    #[test]
    fn matches_title_or_genre_ignoring_case() {
        let catalog = sample();
        let by_genre: Vec<_> = catalog.search("HORROR").iter().map(|m| m.year).collect();
        assert_eq!(by_genre, [1979, 1982]);

        let by_title = catalog.search(" thin ");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "The Thing");
    }

    #[test]
    fn substring_of_existing_title_includes_that_record() {
        let catalog = sample();
        for m in catalog.movies() {
            let needle = &m.title[1..m.title.len() - 1];
            assert!(catalog.search(needle).contains(&m));
        }
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(sample().search("western").is_empty());
    }

    #[test]
    fn replace_discards_previous_snapshot() {
        let mut catalog = sample();
        catalog.replace(vec![movie(9, "Ran", 1985, "Drama")]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find(&MovieId::Number(1)).is_none());
        assert!(catalog.find(&MovieId::Text("9".into())).is_some());
    }
}
