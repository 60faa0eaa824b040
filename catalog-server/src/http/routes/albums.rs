//! Album endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::{located, Located};
use crate::db::repos::AlbumRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Album, AlbumPatch, AlbumRecord, AlbumUpdate, AlbumWithSongs, NewAlbum};

const COLLECTION: &str = "albums";

/// GET /albums - all albums with artist names
async fn list_albums(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Album>>, ApiError> {
    let albums = AlbumRepo::new(&state.pool).list().await?;
    Ok(Json(albums))
}

/// GET /albums/{id} - album with its track list
async fn get_album(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<AlbumWithSongs>, ApiError> {
    let album = AlbumRepo::new(&state.pool).get(id).await?;
    Ok(Json(album))
}

/// POST /albums
async fn create_album(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewAlbum>,
) -> Result<Located<AlbumRecord>, ApiError> {
    let album = AlbumRepo::new(&state.pool).create(&new).await?;
    tracing::info!(album_id = album.id, artist_id = album.artist_id, "Album created");

    Ok(located(StatusCode::CREATED, COLLECTION, album.id, album))
}

/// PUT /albums/{id} - `artist_id` is optional
async fn update_album(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(update): ValidJson<AlbumUpdate>,
) -> Result<Located<AlbumRecord>, ApiError> {
    let album = AlbumRepo::new(&state.pool).update(id, &update).await?;
    Ok(located(StatusCode::OK, COLLECTION, album.id, album))
}

/// PATCH /albums/{id}
async fn patch_album(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(patch): ValidJson<AlbumPatch>,
) -> Result<Located<AlbumRecord>, ApiError> {
    let album = AlbumRepo::new(&state.pool).patch(id, &patch).await?;
    Ok(located(StatusCode::OK, COLLECTION, album.id, album))
}

/// DELETE /albums/{id}
async fn delete_album(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    AlbumRepo::new(&state.pool).delete(id).await?;
    tracing::info!(album_id = id.get(), "Album deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Album routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/albums", get(list_albums).post(create_album))
        .route(
            "/albums/{id}",
            get(get_album)
                .put(update_album)
                .patch(patch_album)
                .delete(delete_album),
        )
}
