use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Identifier assigned by the movie API.
///
/// APIs hand out either numbers or strings; two ids are equal when their
/// textual forms are, so `7` and `"7"` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{n}"),
            MovieId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for MovieId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for MovieId {}

impl Hash for MovieId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for MovieId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(MovieId::Number)
            .unwrap_or_else(|_| MovieId::Text(s.to_string())))
    }
}

/// A record of the collection. Missing or `null` fields read as empty so one
/// sloppy record does not break the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    /// Full replacement of this record's editable fields.
    pub fn with_draft(&self, draft: MovieDraft) -> Movie {
        Movie {
            id: self.id.clone(),
            title: draft.title,
            year: draft.year,
            genre: draft.genre,
        }
    }
}

/// Validated body for creating a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please provide a valid title and year.")]
    InvalidTitleOrYear,
}

/// Raw text of the add/edit form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
    pub genre: String,
}

impl MovieForm {
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            genre: genre.into(),
        }
    }

    /// A form pre-filled with the record's current values.
    pub fn from_movie(movie: &Movie) -> Self {
        Self::new(movie.title.clone(), movie.year.to_string(), movie.genre.clone())
    }

    /// Trims the text fields and parses the year. The title must be
    /// non-empty; the genre may be blank.
    pub fn validate(&self) -> Result<MovieDraft, DraftError> {
        let title = self.title.trim();
        let year = parse_year(&self.year);

        match year {
            Some(year) if !title.is_empty() => Ok(MovieDraft {
                title: title.to_string(),
                genre: self.genre.trim().to_string(),
                year,
            }),
            _ => Err(DraftError::InvalidTitleOrYear),
        }
    }
}

/// Lenient integer parse: leading whitespace, an optional sign, then at
/// least one digit. Anything after the digits is ignored, so `"1999 (re-release)"`
/// reads as 1999.
pub fn parse_year(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i32 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
