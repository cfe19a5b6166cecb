use anyhow::Context;
use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use serde::{Deserialize, Serialize};

use crate::{
    entities::{genre, language, movie},
    error::{AppError, AppResult},
};

/// A movie with its genre and language expanded inline.
#[derive(Clone, Debug, Serialize)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub oscar_count: i32,
    pub release_date: Date,
    pub genre_id: i32,
    pub language_id: i32,
    pub genre: genre::Model,
    pub language: language::Model,
}

impl MovieDetails {
    pub fn assemble(
        movie: movie::Model,
        genre: Option<genre::Model>,
        language: Option<language::Model>,
    ) -> AppResult<Self> {
        let release_date: Date = movie.release_date.parse().with_context(|| {
            format!("movie {} has malformed release_date {:?}", movie.id, movie.release_date)
        })?;
        let genre = genre.with_context(|| {
            format!("movie {} references missing genre {}", movie.id, movie.genre_id)
        })?;
        let language = language.with_context(|| {
            format!("movie {} references missing language {}", movie.id, movie.language_id)
        })?;

        Ok(Self {
            id: movie.id,
            title: movie.title,
            oscar_count: movie.oscar_count,
            release_date,
            genre_id: movie.genre_id,
            language_id: movie.language_id,
            genre,
            language,
        })
    }
}

#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: i32,
    pub release_date: Date,
}

/// Fields to overwrite on an existing movie; `None` leaves the column untouched.
#[derive(Clone, Debug, Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub oscar_count: Option<i32>,
    pub release_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub oscar_count: Option<i32>,
    pub release_date: Option<String>,
}

impl CreateMovieRequest {
    pub fn into_new_movie(self) -> AppResult<NewMovie> {
        let title = self.title.filter(|t| !t.trim().is_empty()).ok_or_else(|| missing("title"))?;
        let genre_id = self.genre_id.ok_or_else(|| missing("genre_id"))?;
        let language_id = self.language_id.ok_or_else(|| missing("language_id"))?;
        let oscar_count = self.oscar_count.ok_or_else(|| missing("oscar_count"))?;
        let raw_date = self.release_date.ok_or_else(|| missing("release_date"))?;

        Ok(NewMovie {
            title,
            genre_id,
            language_id,
            oscar_count,
            release_date: parse_release_date(&raw_date)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub oscar_count: Option<i32>,
    pub release_date: Option<String>,
}

impl UpdateMovieRequest {
    pub fn into_changes(self) -> AppResult<MovieChanges> {
        let release_date = self.release_date.as_deref().map(parse_release_date).transpose()?;

        Ok(MovieChanges {
            title: self.title,
            genre_id: self.genre_id,
            language_id: self.language_id,
            oscar_count: self.oscar_count,
            release_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GenreRequest {
    pub name: Option<String>,
}

impl GenreRequest {
    pub fn into_name(self) -> AppResult<String> {
        self.name.filter(|n| !n.trim().is_empty()).ok_or_else(|| missing("name"))
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieFilter {
    pub genre: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("{field} is required"))
}

/// Reads a release date as written. Datetimes keep only their date part;
/// instants with a `Z`/offset are read in UTC.
pub fn parse_release_date(raw: &str) -> AppResult<Date> {
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<Date>() {
        return Ok(date);
    }
    if let Ok(datetime) = raw.parse::<DateTime>() {
        return Ok(datetime.date());
    }
    raw.parse::<Timestamp>()
        .map(|ts| ts.to_zoned(TimeZone::UTC).date())
        .map_err(|_| AppError::BadRequest(format!("release_date {raw:?} is not an ISO 8601 date")))
}
