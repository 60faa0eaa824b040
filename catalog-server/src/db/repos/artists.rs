//! Artist repository
//!
//! - list: ordered by name
//! - get: artist plus its albums, newest release first
//! - patch: one COALESCE update, so partial changes are all-or-nothing

use sqlx::PgPool;

use super::{classify, DbError, ForeignKeyViolation};
use crate::models::{AlbumRecord, Artist, ArtistPatch, ArtistWithAlbums, EntityId, NewArtist};

const RESOURCE: &str = "Artist";

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every artist ordered by name.
    pub async fn list(&self) -> Result<Vec<Artist>, DbError> {
        let artists = sqlx::query_as::<_, Artist>(
            r#"
            SELECT id, name, description
            FROM artist
            ORDER BY name, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(artists)
    }

    /// Get a single artist with their albums.
    pub async fn get(&self, id: EntityId) -> Result<ArtistWithAlbums, DbError> {
        let artist = sqlx::query_as::<_, Artist>(
            r#"
            SELECT id, name, description
            FROM artist
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        let albums = sqlx::query_as::<_, AlbumRecord>(
            r#"
            SELECT id, artist_id, name, release_year
            FROM album
            WHERE artist_id = $1
            ORDER BY release_year DESC, id
            "#,
        )
        .bind(artist.id)
        .fetch_all(self.pool)
        .await?;

        Ok(ArtistWithAlbums { artist, albums })
    }

    /// Insert an artist and return the stored row.
    pub async fn create(&self, new: &NewArtist) -> Result<Artist, DbError> {
        let artist = sqlx::query_as::<_, Artist>(
            r#"
            INSERT INTO artist (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .fetch_one(self.pool)
        .await?;

        Ok(artist)
    }

    /// Overwrite every mutable field.
    pub async fn update(&self, id: EntityId, new: &NewArtist) -> Result<Artist, DbError> {
        sqlx::query_as::<_, Artist>(
            r#"
            UPDATE artist
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id.get())
        .bind(&new.name)
        .bind(&new.description)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Overwrite only the supplied fields.
    ///
    /// An empty patch still has to match a row, and returns it unchanged.
    pub async fn patch(&self, id: EntityId, patch: &ArtistPatch) -> Result<Artist, DbError> {
        sqlx::query_as::<_, Artist>(
            r#"
            UPDATE artist
            SET name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id.get())
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Delete an artist. Rejected while albums still reference it.
    pub async fn delete(&self, id: EntityId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM artist WHERE id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await
            .map_err(|e| {
                classify(e, || ForeignKeyViolation::HasDependents {
                    resource: RESOURCE,
                    id: id.get(),
                    dependents: "albums",
                })
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: EntityId) -> DbError {
    DbError::NotFound {
        resource: RESOURCE,
        id: id.get(),
    }
}
