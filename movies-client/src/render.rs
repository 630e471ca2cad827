//! HTML and plain-text views of a movie listing.

use crate::model::Movie;

pub const NO_MOVIES_MESSAGE: &str = "No movies found matching your criteria.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load movies. Is JSON Server running?";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for the list container. An empty slice yields the placeholder.
pub fn render_movies(movies: &[&Movie]) -> String {
    if movies.is_empty() {
        return format!("<p>{NO_MOVIES_MESSAGE}</p>");
    }

    movies.iter().map(|movie| render_movie(movie)).collect()
}

fn render_movie(movie: &Movie) -> String {
    let id = escape_html(&movie.id.to_string());
    format!(
        r#"<div class="movie-item" data-id="{id}">
  <div>
    <p><strong>{title}</strong> ({year}) - {genre}</p>
  </div>
  <div class="movie-actions">
    <button class="edit-btn" data-id="{id}">Edit</button>
    <button class="delete-btn" data-id="{id}">Delete</button>
  </div>
</div>
"#,
        title = escape_html(&movie.title),
        year = movie.year,
        genre = escape_html(&movie.genre),
    )
}

pub fn render_load_error() -> String {
    format!(r#"<p style="color:red">{LOAD_FAILED_MESSAGE}</p>"#)
}

/// `[id] Title (year) - Genre`, for terminals.
pub fn movie_line(movie: &Movie) -> String {
    format!("[{}] {} ({}) - {}", movie.id, movie.title, movie.year, movie.genre)
}
