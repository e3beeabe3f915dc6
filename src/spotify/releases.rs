use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, require_token, transport::Transport},
    types::{AlbumObject, ArtistRef, Credential, NewReleasesResponse, Paging, ReleaseRef},
};

/// One page only; artists with more releases are cut off.
pub const RELEASE_PAGE_SIZE: u32 = 50;
pub const NEW_RELEASES_LIMIT: u32 = 20;

impl<T: Transport> SpotifyClient<T> {
    /// Albums, singles, compilations and appearances of a resolved artist.
    ///
    /// # Errors
    ///
    /// `InvalidInput` without a request when `artist` carries no id;
    /// `NotFound` when the artist has no releases.
    pub async fn get_artist_releases(
        &self,
        credential: &Credential,
        artist: &ArtistRef,
    ) -> Result<Vec<ReleaseRef>> {
        if artist.id.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "artist {:?} has no id; pass an artist returned by a search",
                artist.name
            )));
        }
        require_token(credential)?;

        let path = format!(
            "/artists/{id}/albums?limit={limit}",
            id = urlencoding::encode(&artist.id),
            limit = RELEASE_PAGE_SIZE
        );
        let page: Paging<AlbumObject> = self.get(credential, &path).await?;

        if page.total.unwrap_or(0) == 0 {
            return Err(Error::not_found(format!("{} has no releases", artist.name)));
        }

        Ok(page.items.into_iter().map(ReleaseRef::from).collect())
    }

    pub async fn get_new_releases(&self, credential: &Credential) -> Result<Vec<ReleaseRef>> {
        require_token(credential)?;

        let path = format!("/browse/new-releases?limit={NEW_RELEASES_LIMIT}");
        let response: NewReleasesResponse = self.get(credential, &path).await?;

        Ok(response
            .albums
            .items
            .into_iter()
            .map(ReleaseRef::from)
            .collect())
    }
}
