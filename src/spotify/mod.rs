//! # Spotify Integration Module
//!
//! Client-side orchestration over the Spotify Web API. Each operation turns
//! loosely specified input into validated entity references and chains the
//! dependent HTTP calls that one logical request needs.
//!
//! ## Architecture
//!
//! ```text
//! CLI / callback server
//!          ↓
//! Playlist Builder ── Catalog Query Engine
//!          ↓                ↓
//!          Entity Resolver (search)
//!          ↓
//! Token Manager ── Transport (reqwest)
//!          ↓
//! Spotify Web API
//! ```
//!
//! - [`transport`] - the single "send request, get JSON" primitive
//! - [`auth`] - client-credentials and authorization-code grants
//! - [`search`] - free text → artist / track resolution
//! - [`artists`], [`recommendations`], [`releases`] - composite reads
//! - [`playlist`] - the only mutating operation
//!
//! ## Failure semantics
//!
//! Calls within a composite operation run strictly in sequence because each
//! one needs the previous result. A failure is final: nothing retries, and the
//! error kind is passed to the caller unchanged. Preconditions are checked
//! before the first request, so an `InvalidInput` never leaves a remote side
//! effect behind.
//!
//! A [`Credential`] is passed in on every call and never modified. When it
//! goes stale the remote replies 401, which surfaces as `Unauthorized`; getting
//! a fresh one is the caller's job.

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod recommendations;
pub mod releases;
pub mod search;
pub mod transport;

use serde::de::DeserializeOwned;

use crate::{
    error::{Error, Result},
    types::Credential,
};
use transport::{ApiRequest, Transport};

/// Market used for market-scoped endpoints.
pub const MARKET: &str = "US";

/// Entry point for every catalog and playlist operation.
pub struct SpotifyClient<T> {
    transport: T,
    api_url: String,
}

impl<T: Transport> SpotifyClient<T> {
    pub fn new(transport: T, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn get<R: DeserializeOwned>(&self, credential: &Credential, path: &str) -> Result<R> {
        let request = ApiRequest::get(self.endpoint(path)).bearer(credential);
        let json = self.transport.send(request).await?;
        decode(json)
    }

    async fn post<R: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        body: serde_json::Value,
    ) -> Result<R> {
        let request = ApiRequest::post(self.endpoint(path))
            .bearer(credential)
            .header("Content-Type", "application/json")
            .json(body);
        let json = self.transport.send(request).await?;
        decode(json)
    }
}

/// Decodes a reply into a wire type. `null` (empty body) becomes the type's
/// default through `#[serde(default)]`.
fn decode<R: DeserializeOwned>(json: serde_json::Value) -> Result<R> {
    let json = if json.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        json
    };
    serde_json::from_value(json).map_err(Error::from)
}

fn require_token(credential: &Credential) -> Result<()> {
    if credential.access_token.is_empty() {
        return Err(Error::unauthorized("credential carries no access token"));
    }
    Ok(())
}
