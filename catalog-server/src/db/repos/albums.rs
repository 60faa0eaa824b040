//! Album repository
//!
//! Reads join `artist` for the display name. Writes that reference a
//! missing artist surface as `ForeignKeyViolation::MissingParent` and
//! leave no row behind.

use sqlx::PgPool;

use super::{classify, DbError, ForeignKeyViolation};
use crate::models::{
    Album, AlbumPatch, AlbumRecord, AlbumUpdate, AlbumWithSongs, EntityId, NewAlbum, SongRecord,
};

const RESOURCE: &str = "Album";

/// Album repository
pub struct AlbumRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AlbumRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List albums ordered by artist name, then album name.
    pub async fn list(&self) -> Result<Vec<Album>, DbError> {
        let albums = sqlx::query_as::<_, Album>(
            r#"
            SELECT al.id, al.artist_id, ar.name AS artist, al.name, al.release_year
            FROM album al
            JOIN artist ar ON al.artist_id = ar.id
            ORDER BY ar.name, al.name, al.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(albums)
    }

    /// Get a single album with its songs in track order.
    pub async fn get(&self, id: EntityId) -> Result<AlbumWithSongs, DbError> {
        let album = sqlx::query_as::<_, Album>(
            r#"
            SELECT al.id, al.artist_id, ar.name AS artist, al.name, al.release_year
            FROM album al
            JOIN artist ar ON al.artist_id = ar.id
            WHERE al.id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        let songs = sqlx::query_as::<_, SongRecord>(
            r#"
            SELECT id, album_id, title, track_number, duration_seconds
            FROM song
            WHERE album_id = $1
            ORDER BY track_number, id
            "#,
        )
        .bind(album.id)
        .fetch_all(self.pool)
        .await?;

        Ok(AlbumWithSongs { album, songs })
    }

    /// Insert an album under an existing artist.
    pub async fn create(&self, new: &NewAlbum) -> Result<AlbumRecord, DbError> {
        sqlx::query_as::<_, AlbumRecord>(
            r#"
            INSERT INTO album (artist_id, name, release_year)
            VALUES ($1, $2, $3)
            RETURNING id, artist_id, name, release_year
            "#,
        )
        .bind(new.artist_id)
        .bind(&new.name)
        .bind(new.release_year)
        .fetch_one(self.pool)
        .await
        .map_err(missing_artist)
    }

    /// Overwrite name and year; move to another artist only when asked.
    pub async fn update(&self, id: EntityId, update: &AlbumUpdate) -> Result<AlbumRecord, DbError> {
        sqlx::query_as::<_, AlbumRecord>(
            r#"
            UPDATE album
            SET artist_id = COALESCE($2, artist_id), name = $3, release_year = $4
            WHERE id = $1
            RETURNING id, artist_id, name, release_year
            "#,
        )
        .bind(id.get())
        .bind(update.artist_id)
        .bind(&update.name)
        .bind(update.release_year)
        .fetch_optional(self.pool)
        .await
        .map_err(missing_artist)?
        .ok_or_else(|| not_found(id))
    }

    /// Overwrite only the supplied fields in one statement.
    pub async fn patch(&self, id: EntityId, patch: &AlbumPatch) -> Result<AlbumRecord, DbError> {
        sqlx::query_as::<_, AlbumRecord>(
            r#"
            UPDATE album
            SET artist_id = COALESCE($2, artist_id),
                name = COALESCE($3, name),
                release_year = COALESCE($4, release_year)
            WHERE id = $1
            RETURNING id, artist_id, name, release_year
            "#,
        )
        .bind(id.get())
        .bind(patch.artist_id)
        .bind(patch.name.as_deref())
        .bind(patch.release_year)
        .fetch_optional(self.pool)
        .await
        .map_err(missing_artist)?
        .ok_or_else(|| not_found(id))
    }

    /// Delete an album. Rejected while songs still reference it.
    pub async fn delete(&self, id: EntityId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM album WHERE id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await
            .map_err(|e| {
                classify(e, || ForeignKeyViolation::HasDependents {
                    resource: RESOURCE,
                    id: id.get(),
                    dependents: "songs",
                })
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn missing_artist(err: sqlx::Error) -> DbError {
    classify(err, || ForeignKeyViolation::MissingParent { parent: "Artist" })
}

fn not_found(id: EntityId) -> DbError {
    DbError::NotFound {
        resource: RESOURCE,
        id: id.get(),
    }
}
