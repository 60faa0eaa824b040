//! Artist endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::{located, Located};
use crate::db::repos::ArtistRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Artist, ArtistPatch, ArtistWithAlbums, NewArtist};

const COLLECTION: &str = "artists";

/// GET /artists - list all artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Artist>>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(Json(artists))
}

/// GET /artists/{id} - artist with albums
async fn get_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ArtistWithAlbums>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;
    Ok(Json(artist))
}

/// POST /artists - create an artist
async fn create_artist(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewArtist>,
) -> Result<Located<Artist>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).create(&new).await?;
    tracing::info!(artist_id = artist.id, "Artist created");

    Ok(located(StatusCode::CREATED, COLLECTION, artist.id, artist))
}

/// PUT /artists/{id} - replace all fields
async fn update_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(new): ValidJson<NewArtist>,
) -> Result<Located<Artist>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).update(id, &new).await?;
    Ok(located(StatusCode::OK, COLLECTION, artist.id, artist))
}

/// PATCH /artists/{id} - replace supplied fields
async fn patch_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(patch): ValidJson<ArtistPatch>,
) -> Result<Located<Artist>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).patch(id, &patch).await?;
    Ok(located(StatusCode::OK, COLLECTION, artist.id, artist))
}

/// DELETE /artists/{id}
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    ArtistRepo::new(&state.pool).delete(id).await?;
    tracing::info!(artist_id = id.get(), "Artist deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route(
            "/artists/{id}",
            get(get_artist)
                .put(update_artist)
                .patch(patch_artist)
                .delete(delete_artist),
        )
}
