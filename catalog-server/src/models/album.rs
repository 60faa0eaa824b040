//! Album entity and request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::SongRecord;
use super::validation::{storable_opt, storable_text, Validate, ValidationError};

/// A bare row from the `album` table.
///
/// Returned by writes and nested under an artist.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AlbumRecord {
    pub id: i32,
    pub artist_id: i32,
    pub name: String,
    pub release_year: i32,
}

/// Album joined with its artist's display name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Album {
    pub id: i32,
    pub artist_id: i32,
    pub artist: String,
    pub name: String,
    pub release_year: i32,
}

/// Album detail view with its songs in track order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumWithSongs {
    #[serde(flatten)]
    pub album: Album,
    #[serde(rename = "Songs")]
    pub songs: Vec<SongRecord>,
}

/// Body for `POST /albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlbum {
    pub artist_id: i32,
    pub name: String,
    pub release_year: i32,
}

/// Body for `PUT /albums/{id}`.
///
/// `name` and `release_year` are always overwritten. The album only moves
/// to another artist when `artist_id` is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumUpdate {
    pub artist_id: Option<i32>,
    pub name: String,
    pub release_year: i32,
}

/// Body for `PATCH /albums/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumPatch {
    pub artist_id: Option<i32>,
    pub name: Option<String>,
    pub release_year: Option<i32>,
}

impl Validate for NewAlbum {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_text("name", &self.name)
    }
}

impl Validate for AlbumUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_text("name", &self.name)
    }
}

impl Validate for AlbumPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_opt("name", self.name.as_deref())
    }
}
