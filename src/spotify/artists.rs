use futures::{StreamExt, stream};

use crate::{
    error::{Error, Result},
    spotify::{MARKET, SpotifyClient, require_token, transport::Transport},
    types::{ArtistResolution, ArtistsResponse, Credential, TrackRef, TracksResponse},
};

/// Upper bound on concurrent re-resolutions in [`SpotifyClient::get_related_artists`].
pub const RELATED_CONCURRENCY: usize = 4;

impl<T: Transport> SpotifyClient<T> {
    /// Most popular tracks of the artist best matching `artist_name`.
    ///
    /// Uses the exact match when there is one, the first candidate otherwise.
    ///
    /// # Arguments
    ///
    /// * `credential` - App-only or user credential
    /// * `artist_name` - Free-text artist name, sanitized before searching
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<TrackRef>)` - The artist's top tracks in the `US` market
    /// - `Err(NotFound)` - No artist matched, or the artist has no top tracks
    /// - `Err(Unauthorized | Transport)` - Passed through from either call
    ///
    /// # Example
    ///
    /// ```
    /// let tracks = client.get_top_tracks(&credential, "Al Green").await?;
    /// for track in &tracks {
    ///     println!("{} ({})", track.name, track.album_name);
    /// }
    /// ```
    pub async fn get_top_tracks(
        &self,
        credential: &Credential,
        artist_name: &str,
    ) -> Result<Vec<TrackRef>> {
        let artist = self
            .resolve_artist(credential, artist_name)
            .await?
            .into_primary()
            .ok_or_else(|| Error::not_found(format!("no artist matches {artist_name:?}")))?;

        if artist.id.is_empty() {
            return Err(Error::not_found(format!("{} has no id", artist.name)));
        }

        let path = format!(
            "/artists/{id}/top-tracks?market={market}",
            id = urlencoding::encode(&artist.id),
            market = MARKET
        );
        let response: TracksResponse = self.get(credential, &path).await?;

        if response.tracks.is_empty() {
            return Err(Error::not_found(format!("{} has no top tracks", artist.name)));
        }

        Ok(response.tracks.into_iter().map(TrackRef::from).collect())
    }

    /// Artists related to `artist_id`, each re-resolved by name.
    ///
    /// Re-resolving through [`SpotifyClient::resolve_artist`] gives every entry
    /// the same enriched fields as a direct search, at one search per related
    /// artist. Searches run at most [`RELATED_CONCURRENCY`] at a time and the
    /// remote order is kept. An entry whose search finds nothing is skipped.
    ///
    /// # Arguments
    ///
    /// * `credential` - App-only or user credential
    /// * `artist_id` - Catalog id of an already resolved artist
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ArtistResolution>)` - One resolution per related artist that
    ///   could be found again
    /// - `Err(InvalidInput)` - `artist_id` is empty; nothing was sent
    /// - `Err(NotFound)` - No related artists, or none could be re-resolved
    /// - Any other error of a single search aborts the whole call
    pub async fn get_related_artists(
        &self,
        credential: &Credential,
        artist_id: &str,
    ) -> Result<Vec<ArtistResolution>> {
        if artist_id.trim().is_empty() {
            return Err(Error::invalid_input("artist id is empty"));
        }
        require_token(credential)?;

        let path = format!(
            "/artists/{id}/related-artists",
            id = urlencoding::encode(artist_id)
        );
        let response: ArtistsResponse = self.get(credential, &path).await?;

        if response.artists.is_empty() {
            return Err(Error::not_found(format!(
                "no related artists for {artist_id}"
            )));
        }

        let names: Vec<String> = response
            .artists
            .into_iter()
            .filter_map(|a| a.name)
            .collect();

        let resolved: Vec<(String, Result<ArtistResolution>)> = stream::iter(names)
            .map(|name| async move {
                let result = self.resolve_artist(credential, &name).await;
                (name, result)
            })
            .buffered(RELATED_CONCURRENCY)
            .collect()
            .await;

        let mut related = Vec::with_capacity(resolved.len());
        for (name, result) in resolved {
            match result {
                Ok(resolution) => related.push(resolution),
                Err(Error::NotFound(_)) => {
                    log::warn!("related artist {:?} could not be re-resolved", name);
                }
                Err(e) => return Err(e),
            }
        }

        if related.is_empty() {
            return Err(Error::not_found(format!(
                "no related artists for {artist_id} could be resolved"
            )));
        }

        Ok(related)
    }
}
