//! Song endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::{located, Located};
use crate::db::repos::SongRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{NewSong, Song, SongPatch, SongRecord, SongUpdate};

const COLLECTION: &str = "songs";

/// GET /songs - all songs with album and artist names
async fn list_songs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Song>>, ApiError> {
    let songs = SongRepo::new(&state.pool).list().await?;
    Ok(Json(songs))
}

/// GET /songs/{id}
async fn get_song(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Song>, ApiError> {
    let song = SongRepo::new(&state.pool).get(id).await?;
    Ok(Json(song))
}

/// POST /songs
async fn create_song(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewSong>,
) -> Result<Located<SongRecord>, ApiError> {
    let song = SongRepo::new(&state.pool).create(&new).await?;
    tracing::info!(song_id = song.id, album_id = song.album_id, "Song created");

    Ok(located(StatusCode::CREATED, COLLECTION, song.id, song))
}

/// PUT /songs/{id} - `album_id` is optional
async fn update_song(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(update): ValidJson<SongUpdate>,
) -> Result<Located<SongRecord>, ApiError> {
    let song = SongRepo::new(&state.pool).update(id, &update).await?;
    Ok(located(StatusCode::OK, COLLECTION, song.id, song))
}

/// PATCH /songs/{id}
async fn patch_song(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(patch): ValidJson<SongPatch>,
) -> Result<Located<SongRecord>, ApiError> {
    let song = SongRepo::new(&state.pool).patch(id, &patch).await?;
    Ok(located(StatusCode::OK, COLLECTION, song.id, song))
}

/// DELETE /songs/{id}
async fn delete_song(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    SongRepo::new(&state.pool).delete(id).await?;
    tracing::info!(song_id = id.get(), "Song deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Song routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song)
                .put(update_song)
                .patch(patch_song)
                .delete(delete_song),
        )
}
