use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, require_token, transport::Transport},
    types::{
        AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, Credential,
        PlaylistHandle, Scope, TrackRef, UserProfile,
    },
};

pub const PLAYLIST_DESCRIPTION: &str = "Playlist created by Spotufy!";

impl<T: Transport> SpotifyClient<T> {
    /// Creates a playlist named `name` holding `tracks` and returns its link.
    ///
    /// Three calls, each depending on the one before:
    /// 1. `GET /me` for the user id
    /// 2. `POST /users/{id}/playlists` for an empty playlist
    /// 3. `POST /playlists/{id}/tracks` with the track uris
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: empty name, empty track list, or a track without uri.
    ///   Nothing is sent.
    /// - `Unauthorized`: no playlist-modify scope (nothing is sent), or `/me`
    ///   yielded no user id.
    /// - `PartialFailure`: step 3 failed after step 2 succeeded. The empty
    ///   playlist stays on the remote side and its handle is in the error.
    pub async fn create_playlist(
        &self,
        credential: &Credential,
        name: &str,
        tracks: &[TrackRef],
    ) -> Result<String> {
        if name.trim().is_empty() {
            return Err(Error::invalid_input("playlist name is empty"));
        }
        if tracks.is_empty() {
            return Err(Error::invalid_input("no tracks to add"));
        }
        if let Some(track) = tracks.iter().find(|t| t.uri.is_empty()) {
            return Err(Error::invalid_input(format!(
                "track {:?} has no uri",
                track.name
            )));
        }
        if !credential.can_modify_playlists() {
            return Err(Error::unauthorized(
                "credential lacks a playlist-modify scope",
            ));
        }
        require_token(credential)?;

        let uris = serde_json::to_value(AddTracksRequest {
            uris: tracks.iter().map(|t| t.uri.clone()).collect(),
        })?;

        let profile: UserProfile = self.get(credential, "/me").await?;
        let user_id = profile
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::unauthorized("no user id for this credential"))?;

        // private only when the user granted it
        let public = !credential.has_scope(Scope::PlaylistModifyPrivate);
        let playlist = self
            .create_empty_playlist(credential, &user_id, name, public)
            .await?;
        log::debug!("created playlist {} for {}", playlist.id, user_id);

        let path = format!(
            "/playlists/{id}/tracks",
            id = urlencoding::encode(&playlist.id)
        );

        match self
            .post::<serde_json::Value>(credential, &path, uris)
            .await
        {
            Ok(_) => Ok(playlist.external_url),
            Err(e) => {
                log::warn!("playlist {} left empty: {}", playlist.id, e);
                Err(Error::PartialFailure {
                    playlist,
                    source: Box::new(e),
                })
            }
        }
    }

    async fn create_empty_playlist(
        &self,
        credential: &Credential,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistHandle> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: PLAYLIST_DESCRIPTION.to_string(),
            public,
        };
        let path = format!("/users/{id}/playlists", id = urlencoding::encode(user_id));
        let response: CreatePlaylistResponse = self
            .post(credential, &path, serde_json::to_value(&body)?)
            .await?;

        let id = response
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::transport(None, "playlist creation returned no id"))?;

        Ok(PlaylistHandle {
            id,
            external_url: response.external_urls.spotify.unwrap_or_default(),
        })
    }
}
