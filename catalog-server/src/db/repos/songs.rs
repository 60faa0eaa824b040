//! Song repository
//!
//! Reads join through album to artist so both display names come back
//! with each row.

use sqlx::PgPool;

use super::{classify, DbError, ForeignKeyViolation};
use crate::models::{EntityId, NewSong, Song, SongPatch, SongRecord, SongUpdate};

const RESOURCE: &str = "Song";

/// Song repository
pub struct SongRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SongRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List songs ordered by title.
    pub async fn list(&self) -> Result<Vec<Song>, DbError> {
        let songs = sqlx::query_as::<_, Song>(
            r#"
            SELECT s.id, s.album_id, al.name AS album, ar.name AS artist,
                   s.title, s.track_number, s.duration_seconds
            FROM song s
            JOIN album al ON s.album_id = al.id
            JOIN artist ar ON al.artist_id = ar.id
            ORDER BY s.title, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(songs)
    }

    pub async fn get(&self, id: EntityId) -> Result<Song, DbError> {
        sqlx::query_as::<_, Song>(
            r#"
            SELECT s.id, s.album_id, al.name AS album, ar.name AS artist,
                   s.title, s.track_number, s.duration_seconds
            FROM song s
            JOIN album al ON s.album_id = al.id
            JOIN artist ar ON al.artist_id = ar.id
            WHERE s.id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, new: &NewSong) -> Result<SongRecord, DbError> {
        sqlx::query_as::<_, SongRecord>(
            r#"
            INSERT INTO song (album_id, title, track_number, duration_seconds)
            VALUES ($1, $2, $3, $4)
            RETURNING id, album_id, title, track_number, duration_seconds
            "#,
        )
        .bind(new.album_id)
        .bind(&new.title)
        .bind(new.track_number)
        .bind(new.duration_seconds)
        .fetch_one(self.pool)
        .await
        .map_err(missing_album)
    }

    pub async fn update(&self, id: EntityId, update: &SongUpdate) -> Result<SongRecord, DbError> {
        sqlx::query_as::<_, SongRecord>(
            r#"
            UPDATE song
            SET album_id = COALESCE($2, album_id),
                title = $3,
                track_number = $4,
                duration_seconds = $5
            WHERE id = $1
            RETURNING id, album_id, title, track_number, duration_seconds
            "#,
        )
        .bind(id.get())
        .bind(update.album_id)
        .bind(&update.title)
        .bind(update.track_number)
        .bind(update.duration_seconds)
        .fetch_optional(self.pool)
        .await
        .map_err(missing_album)?
        .ok_or_else(|| not_found(id))
    }

    pub async fn patch(&self, id: EntityId, patch: &SongPatch) -> Result<SongRecord, DbError> {
        sqlx::query_as::<_, SongRecord>(
            r#"
            UPDATE song
            SET album_id = COALESCE($2, album_id),
                title = COALESCE($3, title),
                track_number = COALESCE($4, track_number),
                duration_seconds = COALESCE($5, duration_seconds)
            WHERE id = $1
            RETURNING id, album_id, title, track_number, duration_seconds
            "#,
        )
        .bind(id.get())
        .bind(patch.album_id)
        .bind(patch.title.as_deref())
        .bind(patch.track_number)
        .bind(patch.duration_seconds)
        .fetch_optional(self.pool)
        .await
        .map_err(missing_album)?
        .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM song WHERE id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn missing_album(err: sqlx::Error) -> DbError {
    classify(err, || ForeignKeyViolation::MissingParent { parent: "Album" })
}

fn not_found(id: EntityId) -> DbError {
    DbError::NotFound {
        resource: RESOURCE,
        id: id.get(),
    }
}
