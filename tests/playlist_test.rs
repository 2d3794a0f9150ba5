mod common;

use mockito::Matcher;
use serde_json::{Value, json};
use spotmag::{cli::fill_playlist, error::Error, types::AlbumQuery};

use common::client;

fn album_body(id: &str, uris: &[String]) -> String {
    let items: Vec<Value> = uris
        .iter()
        .enumerate()
        .map(|(i, uri)| json!({"id": format!("{}-t{}", id, i), "name": format!("Track {}", i), "uri": uri}))
        .collect();

    json!({"id": id, "name": format!("Album {}", id), "tracks": {"items": items}}).to_string()
}

#[tokio::test]
async fn test_get_or_create_returns_first_exact_match() {
    let mut server = mockito::Server::new_async().await;

    let list = server
        .mock("GET", "/v1/users/u1/playlists")
        .match_query(Matcher::UrlEncoded("limit".into(), "50".into()))
        .match_header("authorization", "Bearer token")
        .with_status(200)
        .with_body(
            json!({"items": [
                {"id": "p1", "name": "Essential heavy metal", "owner": {"id": "u1"}},
                {"id": "p2", "name": "Essential heavy", "owner": {"id": "u1"}},
                {"id": "p3", "name": "Essential heavy", "owner": {"id": "u1"}}
            ]})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let create = server
        .mock("POST", "/v1/users/u1/playlists")
        .expect(0)
        .create_async()
        .await;

    let mut client = client(&server.url());
    let playlist = client
        .get_or_create_playlist("u1", "Essential heavy")
        .await
        .unwrap();

    assert_eq!(playlist.id, "p2");
    assert_eq!(playlist.owner_id(), "u1");
    list.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_get_or_create_creates_once_when_missing() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/v1/users/u1/playlists")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items":[{"id":"p1","name":"Something else","owner":{"id":"u1"}}]}"#)
        .create_async()
        .await;

    let create = server
        .mock("POST", "/v1/users/u1/playlists")
        .match_body(Matcher::PartialJson(json!({
            "name": "Essential heavy",
            "public": false,
            "collaborative": false
        })))
        .with_status(201)
        .with_body(r#"{"id":"new","name":"Essential heavy","owner":{"id":"u1"},"public":false}"#)
        .expect(1)
        .create_async()
        .await;

    let mut client = client(&server.url());
    let playlist = client
        .get_or_create_playlist("u1", "Essential heavy")
        .await
        .unwrap();

    assert_eq!(playlist.id, "new");
    assert_eq!(playlist.public, Some(false));
    create.assert_async().await;
}

#[tokio::test]
async fn test_add_albums_inserts_in_batches_of_100() {
    let mut server = mockito::Server::new_async().await;

    let uris: Vec<String> = (0..250).map(|i| format!("spotify:track:{:03}", i)).collect();

    // 150 tracks on the first album, 100 on the second
    server
        .mock("GET", "/v1/albums/a1")
        .with_status(200)
        .with_body(album_body("a1", &uris[..150]))
        .create_async()
        .await;
    server
        .mock("GET", "/v1/albums/a2")
        .with_status(200)
        .with_body(album_body("a2", &uris[150..]))
        .create_async()
        .await;

    let mut batches = Vec::new();
    for range in [0..100, 100..200, 200..250] {
        let batch = server
            .mock("POST", "/v1/playlists/p1/tracks")
            .match_body(Matcher::Json(json!({"uris": &uris[range.clone()]})))
            .with_status(201)
            .with_body(json!({"snapshot_id": format!("snap-{}", range.end)}).to_string())
            .expect(1)
            .create_async()
            .await;
        batches.push(batch);
    }

    let mut client = client(&server.url());
    let added = client
        .add_albums_to_playlist("p1", &["a1".to_string(), "a2".to_string()])
        .await
        .unwrap();

    assert_eq!(added, 250);
    for batch in batches {
        batch.assert_async().await;
    }
}

#[tokio::test]
async fn test_add_tracks_with_nothing_to_add() {
    let mut server = mockito::Server::new_async().await;

    let insert = server
        .mock("POST", "/v1/playlists/p1/tracks")
        .expect(0)
        .create_async()
        .await;

    let mut client = client(&server.url());
    assert_eq!(client.add_tracks("p1", &[]).await.unwrap(), None);
    insert.assert_async().await;
}

#[tokio::test]
async fn test_failed_batch_stops_insertion() {
    let mut server = mockito::Server::new_async().await;

    let uris: Vec<String> = (0..250).map(|i| format!("spotify:track:{}", i)).collect();

    let first = server
        .mock("POST", "/v1/playlists/p1/tracks")
        .match_body(Matcher::Json(json!({"uris": &uris[..100]})))
        .with_status(201)
        .with_body(r#"{"snapshot_id":"s1"}"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/v1/playlists/p1/tracks")
        .match_body(Matcher::Json(json!({"uris": &uris[100..200]})))
        .with_status(403)
        .with_body(r#"{"error":{"status":403,"message":"You cannot add tracks to a playlist you don't own."}}"#)
        .expect(1)
        .create_async()
        .await;
    let third = server
        .mock("POST", "/v1/playlists/p1/tracks")
        .match_body(Matcher::Json(json!({"uris": &uris[200..]})))
        .with_status(201)
        .with_body(r#"{"snapshot_id":"s3"}"#)
        .expect(0)
        .create_async()
        .await;

    let mut client = client(&server.url());
    match client.add_tracks("p1", &uris).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "You cannot add tracks to a playlist you don't own.");
        }
        other => panic!("expected api failure, got {:?}", other),
    }

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn test_search_album_takes_first_result() {
    let mut server = mockito::Server::new_async().await;

    let search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "artist:Kreator album:Extreme Aggression".into()),
            Matcher::UrlEncoded("type".into(), "album".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"albums":{"items":[
                {"id":"alb1","name":"Extreme Aggression","artists":[{"id":"ar1","name":"Kreator"}]},
                {"id":"alb2","name":"Extreme Aggression (Remastered)"}
            ]}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let mut client = client(&server.url());
    let found = client
        .search_album(&AlbumQuery::new("Kreator", "Extreme Aggression"))
        .await
        .unwrap();

    assert_eq!(found.as_deref(), Some("alb1"));
    search.assert_async().await;
}

#[tokio::test]
async fn test_search_album_without_results() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"albums":{"items":[]}}"#)
        .create_async()
        .await;

    let mut client = client(&server.url());
    let found = client
        .search_album(&AlbumQuery::new("Nobody", "Nothing"))
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_error_field_fails_every_endpoint() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/v1/me")
        .with_status(401)
        .with_body(r#"{"error":{"status":401,"message":"The access token expired"}}"#)
        .create_async()
        .await;
    // error field with a success status still counts
    server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error":{"message":"Service unavailable"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/v1/albums/missing")
        .with_status(404)
        .with_body(r#"{"error":{"status":404,"message":"Non existing id: 'missing'"}}"#)
        .create_async()
        .await;

    let mut client = client(&server.url());

    let err = client.current_user_id().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 401, ref message } if message == "The access token expired"));
    assert!(err.is_auth_error());

    let err = client
        .search_album(&AlbumQuery::new("a", "b"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 200, ref message } if message == "Service unavailable"));

    let err = client.get_album("missing").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, ref message } if message == "Non existing id: 'missing'"));
}

#[tokio::test]
async fn test_fill_playlist_creates_playlist_without_albums() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/v1/me")
        .with_status(200)
        .with_body(r#"{"id":"u1"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/v1/users/u1/playlists")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/v1/users/u1/playlists")
        .match_body(Matcher::PartialJson(json!({"name": "Essential heavy"})))
        .with_status(201)
        .with_body(r#"{"id":"new","name":"Essential heavy","owner":{"id":"u1"}}"#)
        .expect(1)
        .create_async()
        .await;
    let insert = server
        .mock("POST", "/v1/playlists/new/tracks")
        .expect(0)
        .create_async()
        .await;

    let mut client = client(&server.url());
    assert_eq!(fill_playlist(&mut client, "Essential heavy", &[]).await.unwrap(), 0);

    create.assert_async().await;
    insert.assert_async().await;
}
