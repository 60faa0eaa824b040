//! Artist entity and request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::AlbumRecord;
use super::validation::{storable_opt, storable_text, Validate, ValidationError};

/// A row from the `artist` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Artist detail view with its albums, newest release first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistWithAlbums {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(rename = "Albums")]
    pub albums: Vec<AlbumRecord>,
}

/// Body for `POST /artists` and `PUT /artists/{id}`.
///
/// Both fields are required; PUT overwrites them unconditionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub description: String,
}

/// Body for `PATCH /artists/{id}`. Missing and `null` fields are left as stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Validate for NewArtist {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_text("name", &self.name)?;
        storable_text("description", &self.description)
    }
}

impl Validate for ArtistPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        storable_opt("name", self.name.as_deref())?;
        storable_opt("description", self.description.as_deref())
    }
}
