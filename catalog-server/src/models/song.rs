//! Song entity and request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{storable_opt, storable_text, Validate, ValidationError};

/// A bare row from the `song` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SongRecord {
    pub id: i32,
    pub album_id: i32,
    pub title: String,
    pub track_number: i32,
    pub duration_seconds: i32,
}

/// Song joined through its album to the artist.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Song {
    pub id: i32,
    pub album_id: i32,
    pub album: String,
    pub artist: String,
    pub title: String,
    pub track_number: i32,
    pub duration_seconds: i32,
}

/// Body for `POST /songs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSong {
    pub album_id: i32,
    pub title: String,
    pub track_number: i32,
    pub duration_seconds: i32,
}

/// Body for `PUT /songs/{id}`; an absent `album_id` leaves the song where it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongUpdate {
    pub album_id: Option<i32>,
    pub title: String,
    pub track_number: i32,
    pub duration_seconds: i32,
}

/// Body for `PATCH /songs/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongPatch {
    pub album_id: Option<i32>,
    pub title: Option<String>,
    pub track_number: Option<i32>,
    pub duration_seconds: Option<i32>,
}

impl Validate for NewSong {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_text("title", &self.title)
    }
}

impl Validate for SongUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_text("title", &self.title)
    }
}

impl Validate for SongPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_opt("title", self.title.as_deref())
    }
}
