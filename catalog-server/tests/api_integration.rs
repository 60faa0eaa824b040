//! End-to-end API tests against PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p catalog-server -- --ignored

mod common;

use axum::http::{header, Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

use common::{db_app, id_of, send, unique};

async fn create(app: &Router, collection: &str, body: Value) -> Value {
    let reply = send(app, Method::POST, &format!("/{}", collection), Some(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body
}

async fn create_artist(app: &Router, name: &str) -> i64 {
    id_of(&create(app, "artists", json!({"name": name, "description": "test"})).await)
}

async fn create_album(app: &Router, artist_id: i64, name: &str, year: i32) -> i64 {
    let body = json!({"artist_id": artist_id, "name": name, "release_year": year});
    id_of(&create(app, "albums", body).await)
}

async fn create_song(app: &Router, album_id: i64, title: &str, track: i32) -> i64 {
    let body = json!({
        "album_id": album_id,
        "title": title,
        "track_number": track,
        "duration_seconds": 200,
    });
    id_of(&create(app, "songs", body).await)
}

#[tokio::test]
#[ignore = "requires database"]
async fn artist_round_trip() {
    let (app, _pool) = db_app().await;
    let name = unique("X");

    let reply = send(
        &app,
        Method::POST,
        "/artists",
        Some(json!({"name": name, "description": "Y"})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    let id = id_of(&reply.body);
    assert!(id > 0);
    assert_eq!(reply.body, json!({"id": id, "name": name, "description": "Y"}));
    assert_eq!(
        reply.headers[header::LOCATION],
        format!("/artists/{}", id).as_str()
    );

    let reply = send(&app, Method::GET, &format!("/artists/{}", id), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body,
        json!({"id": id, "name": name, "description": "Y", "Albums": []})
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn artist_detail_orders_albums_newest_first() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Discography")).await;

    create_album(&app, artist_id, "Middle", 2005).await;
    create_album(&app, artist_id, "Oldest", 1999).await;
    create_album(&app, artist_id, "Newest", 2020).await;

    let reply = send(&app, Method::GET, &format!("/artists/{}", artist_id), None).await;
    let years: Vec<i64> = reply.body["Albums"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["release_year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2020, 2005, 1999]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn patch_one_field_leaves_others() {
    let (app, _pool) = db_app().await;
    let name = unique("Patched");
    let id = create_artist(&app, &name).await;
    let uri = format!("/artists/{}", id);

    let reply = send(&app, Method::PATCH, &uri, Some(json!({"description": "changed"}))).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers[header::LOCATION], uri.as_str());
    assert_eq!(
        reply.body,
        json!({"id": id, "name": name, "description": "changed"})
    );

    // null counts as absent
    let reply = send(&app, Method::PATCH, &uri, Some(json!({"name": null}))).await;
    assert_eq!(reply.body["name"], name.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn patch_all_fields_matches_update() {
    let (app, _pool) = db_app().await;
    let first = create_artist(&app, &unique("Left")).await;
    let second = create_artist(&app, &unique("Right")).await;
    let body = json!({"name": unique("Same"), "description": ""});

    let patched = send(&app, Method::PATCH, &format!("/artists/{}", first), Some(body.clone())).await;
    let updated = send(&app, Method::PUT, &format!("/artists/{}", second), Some(body.clone())).await;

    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(patched.body["name"], updated.body["name"]);
    assert_eq!(patched.body["description"], updated.body["description"]);
    assert_eq!(updated.body["description"], "");
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_is_404() {
    let (app, _pool) = db_app().await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/artists/{}", i32::MAX),
        Some(json!({"name": "X", "description": "Y"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, json!({"error": "Artist not found"}));

    let reply = send(
        &app,
        Method::PATCH,
        &format!("/songs/{}", i32::MAX),
        Some(json!({})),
    )
    .await;
    assert_eq!(reply.body, json!({"error": "Song not found"}));
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_then_get_is_404() {
    let (app, _pool) = db_app().await;
    let id = create_artist(&app, &unique("Doomed")).await;
    let uri = format!("/artists/{}", id);

    let reply = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert_eq!(reply.body, Value::Null);

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    // Second delete affects no rows
    let reply = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_missing_album_is_404() {
    let (app, _pool) = db_app().await;

    let reply = send(&app, Method::DELETE, &format!("/albums/{}", i32::MAX), None).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, json!({"error": "Album not found"}));
}

#[tokio::test]
#[ignore = "requires database"]
async fn album_with_unknown_artist_leaves_no_row() {
    let (app, pool) = db_app().await;
    let name = unique("Orphan");

    let reply = send(
        &app,
        Method::POST,
        "/albums",
        Some(json!({"artist_id": i32::MAX, "name": name, "release_year": 2001})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body, json!({"error": "Artist not found"}));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM album WHERE name = $1")
        .bind(&name)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn song_with_unknown_album_is_422() {
    let (app, _pool) = db_app().await;

    let reply = send(
        &app,
        Method::POST,
        "/songs",
        Some(json!({
            "album_id": i32::MAX,
            "title": "Nowhere",
            "track_number": 1,
            "duration_seconds": 10,
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body, json!({"error": "Album not found"}));
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_parent_with_children_is_rejected() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Parent")).await;
    let album_id = create_album(&app, artist_id, "Child", 2010).await;
    create_song(&app, album_id, "Grandchild", 1).await;

    let reply = send(&app, Method::DELETE, &format!("/artists/{}", artist_id), None).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body, json!({"error": "Artist still has albums"}));

    let reply = send(&app, Method::DELETE, &format!("/albums/{}", album_id), None).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body, json!({"error": "Album still has songs"}));

    let reply = send(&app, Method::GET, &format!("/albums/{}", album_id), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["Songs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn album_list_orders_by_artist_then_name() {
    let (app, _pool) = db_app().await;
    let tag = unique("");
    let zed = create_artist(&app, &format!("Zed{}", tag)).await;
    let abe = create_artist(&app, &format!("Abe{}", tag)).await;

    let ours = [
        create_album(&app, zed, "Alpha", 2000).await,
        create_album(&app, abe, "Beta", 2000).await,
        create_album(&app, abe, "Alpha", 2000).await,
    ];

    let reply = send(&app, Method::GET, "/albums", None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let listed: Vec<(String, String)> = reply
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| ours.contains(&id_of(a)))
        .map(|a| {
            (
                a["artist"].as_str().unwrap().to_owned(),
                a["name"].as_str().unwrap().to_owned(),
            )
        })
        .collect();

    assert_eq!(
        listed,
        vec![
            (format!("Abe{}", tag), "Alpha".to_owned()),
            (format!("Abe{}", tag), "Beta".to_owned()),
            (format!("Zed{}", tag), "Alpha".to_owned()),
        ]
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn song_list_orders_by_title_with_names() {
    let (app, _pool) = db_app().await;
    let artist_name = unique("Singer");
    let artist_id = create_artist(&app, &artist_name).await;
    let album_id = create_album(&app, artist_id, "Record", 2015).await;
    let tag = unique("");

    let ours = [
        create_song(&app, album_id, &format!("b{}", tag), 1).await,
        create_song(&app, album_id, &format!("a{}", tag), 2).await,
    ];

    let reply = send(&app, Method::GET, "/songs", None).await;
    let listed: Vec<&Value> = reply
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| ours.contains(&id_of(s)))
        .collect();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["title"], format!("a{}", tag).as_str());
    assert_eq!(listed[1]["title"], format!("b{}", tag).as_str());
    assert_eq!(listed[0]["artist"], artist_name.as_str());
    assert_eq!(listed[0]["album"], "Record");
}

#[tokio::test]
#[ignore = "requires database"]
async fn patch_song_track_number_only() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Band")).await;
    let album_id = create_album(&app, artist_id, "LP", 1977).await;
    let title = unique("Track");
    let song_id = create_song(&app, album_id, &title, 1).await;
    let uri = format!("/songs/{}", song_id);

    let reply = send(&app, Method::PATCH, &uri, Some(json!({"track_number": 5}))).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers[header::LOCATION], uri.as_str());
    assert_eq!(
        reply.body,
        json!({
            "id": song_id,
            "album_id": album_id,
            "title": title,
            "track_number": 5,
            "duration_seconds": 200,
        })
    );

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.body["track_number"], 5);
    assert_eq!(reply.body["title"], title.as_str());
    assert_eq!(reply.body["duration_seconds"], 200);
}

#[tokio::test]
#[ignore = "requires database"]
async fn album_detail_orders_songs_by_track() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Trio")).await;
    let album_id = create_album(&app, artist_id, "Sides", 1984).await;

    create_song(&app, album_id, "Three", 3).await;
    create_song(&app, album_id, "One", 1).await;
    create_song(&app, album_id, "Two", 2).await;

    let reply = send(&app, Method::GET, &format!("/albums/{}", album_id), None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let titles: Vec<&str> = reply.body["Songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn album_patch_to_unknown_artist_keeps_row() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Owner")).await;
    let album_id = create_album(&app, artist_id, "Kept", 1990).await;
    let uri = format!("/albums/{}", album_id);

    let reply = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"artist_id": i32::MAX, "name": "Moved"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    // Single statement: the name change rolled back with the bad reference
    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.body["name"], "Kept");
    assert_eq!(reply.body["artist_id"], artist_id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn album_put_overwrites_with_empty_values() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Keeper")).await;
    let album_id = create_album(&app, artist_id, "Full", 1990).await;
    let uri = format!("/albums/{}", album_id);

    // No artist_id: the album stays with its artist
    let reply = send(&app, Method::PUT, &uri, Some(json!({"name": "", "release_year": 0}))).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers[header::LOCATION], uri.as_str());
    assert_eq!(
        reply.body,
        json!({"id": album_id, "artist_id": artist_id, "name": "", "release_year": 0})
    );

    let other = create_artist(&app, &unique("Taker")).await;
    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"artist_id": other, "name": "Moved", "release_year": 2001})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["artist_id"], other);

    let reply = send(&app, Method::GET, &format!("/artists/{}", artist_id), None).await;
    assert_eq!(reply.body["Albums"], json!([]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn song_put_overwrites_with_zero_values() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Quartet")).await;
    let album_id = create_album(&app, artist_id, "EP", 2003).await;
    let song_id = create_song(&app, album_id, &unique("Loud"), 4).await;
    let uri = format!("/songs/{}", song_id);

    let reply = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"title": "", "track_number": 0, "duration_seconds": 0})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers[header::LOCATION], uri.as_str());
    assert_eq!(
        reply.body,
        json!({
            "id": song_id,
            "album_id": album_id,
            "title": "",
            "track_number": 0,
            "duration_seconds": 0,
        })
    );

    let reply = send(&app, Method::GET, &uri, None).await;
    assert_eq!(reply.body["title"], "");
    assert_eq!(reply.body["album"], "EP");
}

#[tokio::test]
#[ignore = "requires database"]
async fn put_with_unknown_parent_is_422() {
    let (app, _pool) = db_app().await;
    let artist_id = create_artist(&app, &unique("Anchor")).await;
    let album_id = create_album(&app, artist_id, "Stays", 1995).await;
    let title = unique("Fixed");
    let song_id = create_song(&app, album_id, &title, 1).await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/albums/{}", album_id),
        Some(json!({"artist_id": i32::MAX, "name": "Gone", "release_year": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body, json!({"error": "Artist not found"}));

    let reply = send(
        &app,
        Method::PUT,
        &format!("/songs/{}", song_id),
        Some(json!({
            "album_id": i32::MAX,
            "title": "Gone",
            "track_number": 9,
            "duration_seconds": 9,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.body, json!({"error": "Album not found"}));

    // Neither row changed
    let reply = send(&app, Method::GET, &format!("/albums/{}", album_id), None).await;
    assert_eq!(reply.body["name"], "Stays");
    assert_eq!(reply.body["Songs"][0]["title"], title.as_str());
}
