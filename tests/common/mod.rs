#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use spotufy::{
    Result,
    error::Error,
    spotify::transport::{ApiRequest, Body, Transport, classify_status},
    types::{Credential, Scope},
};

pub const API_URL: &str = "https://api.test/v1";

/// What a route answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

#[derive(Default)]
struct Inner {
    routes: Vec<(String, Reply)>,
    requests: Vec<ApiRequest>,
}

/// In-memory transport. A request is answered by the first registered route
/// whose pattern occurs in its URL; routes can be hit any number of times.
/// Unrouted requests fail with HTTP 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, pattern: &str, reply: Reply) -> Self {
        self.inner
            .lock()
            .unwrap()
            .routes
            .push((pattern.to_string(), reply));
        self
    }

    pub fn json(self, pattern: &str, body: Value) -> Self {
        self.on(pattern, Reply::Json(body))
    }

    pub fn status(self, pattern: &str, status: u16) -> Self {
        self.on(pattern, Reply::Status(status))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = request.url.clone();
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request);
            inner
                .routes
                .iter()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .map(|(_, reply)| reply.clone())
        };

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status)) => Err(classify_status(status, "")),
            None => Err(Error::transport(Some(404), format!("no route for {url}"))),
        }
    }
}

pub fn credential(scopes: &[Scope]) -> Credential {
    Credential::new("test-token", scopes.iter().copied().collect(), 3600)
}

pub fn json_body(request: &ApiRequest) -> Value {
    match &request.body {
        Body::Json(value) => value.clone(),
        other => panic!("expected a JSON body, got {other:?}"),
    }
}

pub fn form_value(request: &ApiRequest, key: &str) -> Option<String> {
    match &request.body {
        Body::Form(fields) => fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()),
        _ => None,
    }
}

pub fn artist_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "popularity": 70,
        "followers": { "total": 1234567 },
        "genres": ["soul", "southern soul"],
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{id}") },
        "images": [{ "url": format!("https://img.test/{id}.jpg"), "height": 640, "width": 640 }],
        "uri": format!("spotify:artist:{id}")
    })
}

pub fn artist_search(artists: &[Value]) -> Value {
    json!({
        "artists": {
            "items": artists,
            "total": artists.len(),
            "next": null
        }
    })
}

pub fn track_json(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "duration_ms": 182000,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") },
        "uri": format!("spotify:track:{id}"),
        "artists": [{ "id": "a1", "name": artist, "uri": "spotify:artist:a1" }],
        "album": {
            "id": "alb1",
            "name": "Let's Stay Together",
            "album_type": "album",
            "release_date": "1972-01-01",
            "total_tracks": 9,
            "images": [
                { "url": "https://img.test/large.jpg" },
                { "url": "https://img.test/medium.jpg" }
            ],
            "artists": [{ "id": "a1", "name": artist }]
        }
    })
}
