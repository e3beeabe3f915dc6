use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, require_token, transport::Transport},
    types::{ArtistRef, ArtistResolution, CandidateSet, Credential, SearchResponse, TrackRef},
    utils,
};

/// Result size for artist searches.
pub const ARTIST_SEARCH_LIMIT: u32 = 5;

impl<T: Transport> SpotifyClient<T> {
    /// Searches artists by name and returns every match, best first.
    ///
    /// # Errors
    ///
    /// `NotFound` when the sanitized name is empty (no request is sent) or
    /// when the search reports zero total matches.
    pub async fn search_artists(
        &self,
        credential: &Credential,
        input_name: &str,
    ) -> Result<CandidateSet<ArtistRef>> {
        let name = utils::sanitize_input(input_name);
        if name.trim().is_empty() {
            return Err(Error::not_found("empty artist name"));
        }
        require_token(credential)?;

        let path = format!(
            "/search?q={query}&type=artist&limit={limit}",
            query = urlencoding::encode(&name),
            limit = ARTIST_SEARCH_LIMIT
        );
        let response: SearchResponse = self.get(credential, &path).await?;
        let page = response.artists.unwrap_or_default();

        if page.total.unwrap_or(0) == 0 {
            return Err(Error::not_found(format!("no artist matches {name:?}")));
        }

        let artists: Vec<ArtistRef> = page.items.into_iter().map(ArtistRef::from).collect();
        if artists.is_empty() {
            return Err(Error::not_found(format!("no artist matches {name:?}")));
        }

        Ok(CandidateSet::new(artists))
    }

    /// Resolves a free-text artist name.
    ///
    /// A top result whose name equals the sanitized input (ignoring case) is
    /// returned on its own; anything else comes back as candidates for the
    /// caller to choose from.
    ///
    /// # Example
    ///
    /// ```
    /// match client.resolve_artist(&credential, "al green").await? {
    ///     ArtistResolution::Exact(artist) => println!("{}", artist.id),
    ///     ArtistResolution::Candidates(candidates) => {
    ///         let choice = candidates.pick(1);
    ///     }
    /// }
    /// ```
    pub async fn resolve_artist(
        &self,
        credential: &Credential,
        input_name: &str,
    ) -> Result<ArtistResolution> {
        let candidates = self.search_artists(credential, input_name).await?;
        let wanted = utils::sanitize_input(input_name).trim().to_lowercase();

        let mut artists = candidates.into_vec();
        let exact = artists
            .first()
            .is_some_and(|top| top.name.to_lowercase() == wanted);

        if exact {
            log::debug!("exact artist match for {:?}", wanted);
            return Ok(ArtistResolution::Exact(artists.swap_remove(0)));
        }

        Ok(ArtistResolution::Candidates(CandidateSet::new(artists)))
    }

    /// Finds the single track best matching a track and artist name.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when either name is empty, before any request is sent;
    /// `NotFound` when the field-scoped search has no result.
    pub async fn resolve_track(
        &self,
        credential: &Credential,
        track_name: &str,
        artist_name: &str,
    ) -> Result<TrackRef> {
        if track_name.trim().is_empty() {
            return Err(Error::invalid_input("track name is empty"));
        }
        if artist_name.trim().is_empty() {
            return Err(Error::invalid_input("artist name is empty"));
        }

        let track = utils::sanitize_input(track_name);
        let artist = utils::sanitize_input(artist_name);
        if track.trim().is_empty() || artist.trim().is_empty() {
            return Err(Error::invalid_input(
                "track and artist need at least one letter or digit",
            ));
        }
        require_token(credential)?;

        let path = format!(
            "/search?q={query}&type=track&limit=1",
            query = utils::field_query(&[("track", &track), ("artist", &artist)])
        );
        let response: SearchResponse = self.get(credential, &path).await?;

        response
            .tracks
            .unwrap_or_default()
            .items
            .into_iter()
            .next()
            .map(TrackRef::from)
            .ok_or_else(|| Error::not_found(format!("no track {track:?} by {artist:?}")))
    }
}
