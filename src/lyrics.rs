//! Lyrics lookup.
//!
//! [`fetch_lyrics`] validates input, asks a [`LyricsSource`] for the song and
//! normalizes the raw block by dropping its first line, which sources use for
//! attribution. [`LrcLibSource`] is the bundled source, backed by the LRCLib
//! JSON API.

use std::future::Future;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    spotify::transport::{ApiRequest, Transport},
    utils,
};

/// A song as returned by a lyrics source. `lyrics` starts with one
/// attribution line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

pub trait LyricsSource {
    /// `Ok(None)` when the source knows no matching song.
    fn search_song(
        &self,
        artist_name: &str,
        track_name: &str,
    ) -> impl Future<Output = Result<Option<Song>>> + Send;
}

/// Lyrics of `track_name` by `artist_name`, without the attribution line.
///
/// # Errors
///
/// `InvalidInput` when either name is empty (the source is not asked),
/// `NotFound` when the source has no such song.
pub async fn fetch_lyrics<S: LyricsSource>(
    source: &S,
    artist_name: &str,
    track_name: &str,
) -> Result<String> {
    if artist_name.trim().is_empty() {
        return Err(Error::invalid_input("no artist name included in search"));
    }
    if track_name.trim().is_empty() {
        return Err(Error::invalid_input("no track name included in search"));
    }

    match source.search_song(artist_name, track_name).await? {
        Some(song) => Ok(utils::strip_first_line(&song.lyrics)),
        None => Err(Error::not_found(format!(
            "no lyrics for {track_name:?} by {artist_name:?}"
        ))),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LrcLibRecord {
    track_name: Option<String>,
    artist_name: Option<String>,
    plain_lyrics: Option<String>,
    instrumental: bool,
}

pub struct LrcLibSource<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> LrcLibSource<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl<T: Transport + Sync> LyricsSource for LrcLibSource<T> {
    async fn search_song(&self, artist_name: &str, track_name: &str) -> Result<Option<Song>> {
        let url = format!(
            "{base}/get?artist_name={artist}&track_name={track}",
            base = self.base_url,
            artist = urlencoding::encode(artist_name),
            track = urlencoding::encode(track_name),
        );

        let json = match self.transport.send(ApiRequest::get(url)).await {
            Ok(json) => json,
            Err(e) if e.status() == Some(404) => return Ok(None),
            Err(e) => return Err(e),
        };

        let record: LrcLibRecord = serde_json::from_value(json)?;
        let lyrics = match record.plain_lyrics.filter(|l| !l.trim().is_empty()) {
            Some(lyrics) => lyrics,
            None if record.instrumental => "[Instrumental]".to_string(),
            None => return Ok(None),
        };

        let title = record.track_name.unwrap_or_else(|| track_name.to_string());
        let artist = record.artist_name.unwrap_or_else(|| artist_name.to_string());

        Ok(Some(Song {
            lyrics: format!("{artist} - {title}\n{lyrics}"),
            title,
            artist,
        }))
    }
}
