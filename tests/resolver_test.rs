mod common;

use common::{API_URL, MockTransport, artist_json, artist_search, credential, track_json};
use serde_json::json;
use spotufy::{
    error::Error,
    spotify::SpotifyClient,
    types::{ArtistResolution, ImageUrl},
};

fn al_green_results() -> serde_json::Value {
    artist_search(&[
        artist_json("al1", "Al Green"),
        artist_json("al2", "Al Green Jr"),
        artist_json("al3", "Green Day"),
        artist_json("al4", "Al Jarreau"),
        artist_json("al5", "Alabama Green"),
    ])
}

#[tokio::test]
async fn test_resolve_artist_exact_match() {
    let transport = MockTransport::new().json("type=artist", al_green_results());
    let client = SpotifyClient::new(transport.clone(), API_URL);

    let resolution = client
        .resolve_artist(&credential(&[]), "al green")
        .await
        .unwrap();

    // top result equals the input ignoring case
    match resolution {
        ArtistResolution::Exact(artist) => {
            assert_eq!(artist.id, "al1");
            assert_eq!(artist.name, "Al Green");
            assert_eq!(artist.follower_count, 1234567);
            assert_eq!(
                artist.image_url,
                ImageUrl::Url("https://img.test/al1.jpg".to_string())
            );
        }
        other => panic!("expected an exact match, got {other:?}"),
    }

    assert_eq!(
        transport.urls(),
        vec![format!("{API_URL}/search?q=al%20green&type=artist&limit=5")]
    );
}

#[tokio::test]
async fn test_resolve_artist_returns_candidates_without_exact_match() {
    let transport = MockTransport::new().json("type=artist", al_green_results());
    let client = SpotifyClient::new(transport, API_URL);

    let resolution = client
        .resolve_artist(&credential(&[]), "Green")
        .await
        .unwrap();

    assert!(!resolution.is_exact());
    let ArtistResolution::Candidates(candidates) = resolution else {
        panic!("expected candidates");
    };
    assert_eq!(candidates.len(), 5);
    // numbering shown to users starts at 1
    assert!(candidates.pick(0).is_none());
    assert_eq!(candidates.pick(1).unwrap().name, "Al Green");
    assert_eq!(candidates.pick(5).unwrap().name, "Alabama Green");
    assert!(candidates.pick(6).is_none());
}

#[tokio::test]
async fn test_resolve_artist_strips_special_characters() {
    let transport = MockTransport::new().json("type=artist", al_green_results());
    let client = SpotifyClient::new(transport.clone(), API_URL);

    let resolution = client
        .resolve_artist(&credential(&[]), "Al Green!?")
        .await
        .unwrap();

    assert!(resolution.is_exact());
    assert!(transport.urls()[0].contains("q=Al%20Green&"));
}

#[tokio::test]
async fn test_resolve_artist_not_found_on_zero_total() {
    let transport = MockTransport::new().json("type=artist", artist_search(&[]));
    let client = SpotifyClient::new(transport.clone(), API_URL);

    let err = client
        .resolve_artist(&credential(&[]), "zzzzzz")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_resolve_artist_not_found_on_zero_total_with_items() {
    // total wins over a matching first item
    let transport = MockTransport::new().json(
        "type=artist",
        json!({ "artists": { "total": 0, "items": [artist_json("al1", "Al Green")] } }),
    );
    let client = SpotifyClient::new(transport, API_URL);

    let err = client
        .resolve_artist(&credential(&[]), "Al Green")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_resolve_artist_tolerates_null_fields() {
    let transport = MockTransport::new().json(
        "type=artist",
        json!({
            "artists": {
                "total": 1,
                "items": [{
                    "id": "al1",
                    "name": "Al Green",
                    "popularity": null,
                    "followers": null,
                    "genres": null,
                    "external_urls": null,
                    "images": null,
                    "uri": null
                }]
            }
        }),
    );
    let client = SpotifyClient::new(transport, API_URL);

    let resolution = client
        .resolve_artist(&credential(&[]), "Al Green")
        .await
        .unwrap();

    let ArtistResolution::Exact(artist) = resolution else {
        panic!("expected an exact match");
    };
    assert_eq!(artist.id, "al1");
    assert_eq!(artist.follower_count, 0);
    assert!(artist.genres.is_empty());
    assert!(artist.external_url.is_empty());
    assert_eq!(artist.image_url, ImageUrl::NotFound);
}

#[tokio::test]
async fn test_resolve_track_tolerates_null_album() {
    let transport = MockTransport::new().json(
        "type=track",
        json!({
            "tracks": {
                "total": 1,
                "items": [{
                    "id": "t1",
                    "name": "Home",
                    "album": null,
                    "artists": null,
                    "external_urls": null
                }]
            }
        }),
    );
    let client = SpotifyClient::new(transport, API_URL);

    let track = client
        .resolve_track(&credential(&[]), "Home", "Resonance")
        .await
        .unwrap();

    assert_eq!(track.id, "t1");
    assert!(track.album_name.is_empty());
    assert!(track.primary_artist_name.is_empty());
    assert_eq!(track.image_url, ImageUrl::NotFound);
}

#[tokio::test]
async fn test_resolve_artist_empty_input_sends_nothing() {
    let transport = MockTransport::new().json("type=artist", al_green_results());
    let client = SpotifyClient::new(transport.clone(), API_URL);

    for input in ["", "   ", "!!!"] {
        let err = client
            .resolve_artist(&credential(&[]), input)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "{input:?}: {err:?}");
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_search_artists_returns_all_matches() {
    let transport = MockTransport::new().json("type=artist", al_green_results());
    let client = SpotifyClient::new(transport, API_URL);

    let candidates = client
        .search_artists(&credential(&[]), "Al Green")
        .await
        .unwrap();

    let names: Vec<&str> = candidates.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Al Green", "Al Green Jr", "Green Day", "Al Jarreau", "Alabama Green"]
    );
}

#[tokio::test]
async fn test_search_sends_bearer_token() {
    let transport = MockTransport::new().json("type=artist", al_green_results());
    let client = SpotifyClient::new(transport.clone(), API_URL);

    client
        .search_artists(&credential(&[]), "Al Green")
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].header_value("authorization"),
        Some("Bearer test-token")
    );
}

#[tokio::test]
async fn test_search_unauthorized_on_401() {
    let transport = MockTransport::new().status("type=artist", 401);
    let client = SpotifyClient::new(transport, API_URL);

    let err = client
        .search_artists(&credential(&[]), "Al Green")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized(_)));
}

#[tokio::test]
async fn test_resolve_track_empty_input_sends_nothing() {
    let transport = MockTransport::new();
    let client = SpotifyClient::new(transport.clone(), API_URL);

    let cases = [("", "Al Green"), ("Home", ""), ("  ", "Al Green"), ("???", "Al Green")];
    for (track, artist) in cases {
        let err = client
            .resolve_track(&credential(&[]), track, artist)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "{track:?}/{artist:?}");
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_resolve_track_uses_field_scoped_query() {
    let transport = MockTransport::new().json(
        "type=track",
        json!({ "tracks": { "items": [track_json("t1", "Home", "Resonance")], "total": 1 } }),
    );
    let client = SpotifyClient::new(transport.clone(), API_URL);

    let track = client
        .resolve_track(&credential(&[]), "Home", "Resonance")
        .await
        .unwrap();

    assert_eq!(
        transport.urls(),
        vec![format!(
            "{API_URL}/search?q=track%3AHome+artist%3AResonance&type=track&limit=1"
        )]
    );

    assert_eq!(track.id, "t1");
    assert_eq!(track.primary_artist_name, "Resonance");
    assert_eq!(track.album_name, "Let's Stay Together");
    assert_eq!(track.duration_seconds, 182.0);
    assert_eq!(track.release_date, "1972-01-01");
    // medium cover preferred
    assert_eq!(track.image_url.url(), Some("https://img.test/medium.jpg"));
}

#[tokio::test]
async fn test_resolve_track_not_found_without_items() {
    let transport =
        MockTransport::new().json("type=track", json!({ "tracks": { "items": [], "total": 0 } }));
    let client = SpotifyClient::new(transport, API_URL);

    let err = client
        .resolve_track(&credential(&[]), "Nothing", "Nobody")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}
