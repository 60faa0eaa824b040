//! Domain models and request bodies
//!
//! Row types derive `FromRow` and serialize directly as response bodies.
//! Request bodies are plain serde structs; JSON binding is the only
//! presence check they get.

pub mod validation;
pub mod id;
pub mod artist;
pub mod album;
pub mod song;

pub use validation::{Validate, ValidationError};
pub use id::EntityId;
pub use artist::{Artist, ArtistPatch, ArtistWithAlbums, NewArtist};
pub use album::{Album, AlbumPatch, AlbumRecord, AlbumUpdate, AlbumWithSongs, NewAlbum};
pub use song::{NewSong, Song, SongPatch, SongRecord, SongUpdate};
