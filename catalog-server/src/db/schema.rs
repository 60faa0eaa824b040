//! Schema bootstrap for the catalog tables
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so running it against an
//! existing database is a no-op. Foreign keys are `ON DELETE RESTRICT`;
//! parents with children cannot be deleted.

use sqlx::PgPool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS artist (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS album (
        id SERIAL PRIMARY KEY,
        artist_id INTEGER NOT NULL REFERENCES artist(id) ON DELETE RESTRICT,
        name TEXT NOT NULL,
        release_year INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_album_artist_id ON album(artist_id)",
    r#"
    CREATE TABLE IF NOT EXISTS song (
        id SERIAL PRIMARY KEY,
        album_id INTEGER NOT NULL REFERENCES album(id) ON DELETE RESTRICT,
        title TEXT NOT NULL,
        track_number INTEGER NOT NULL,
        duration_seconds INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_song_album_id ON song(album_id)",
];

/// Create the artist, album and song tables if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running catalog migrations...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Catalog migrations complete");
    Ok(())
}
