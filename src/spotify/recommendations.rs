use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, require_token, transport::Transport},
    types::{Credential, Paging, Scope, TrackObject, TrackRef, TracksResponse},
    utils,
};

pub const RECOMMENDATION_LIMIT: u32 = 5;
pub const TOP_TRACK_SEEDS: u32 = 5;

impl<T: Transport> SpotifyClient<T> {
    /// Recommendations seeded by one track, found by track and artist name.
    pub async fn get_track_recommendations(
        &self,
        credential: &Credential,
        track_name: &str,
        artist_name: &str,
    ) -> Result<Vec<TrackRef>> {
        let seed = self
            .resolve_track(credential, track_name, artist_name)
            .await?;
        if seed.id.is_empty() {
            return Err(Error::not_found(format!("{} has no id", seed.name)));
        }

        self.recommendations(credential, &[seed.id]).await
    }

    /// Recommendations seeded by the user's five most played tracks of the
    /// last weeks.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a request when the credential lacks the
    /// `user-top-read` scope.
    pub async fn get_user_recommendations(&self, credential: &Credential) -> Result<Vec<TrackRef>> {
        if !credential.has_scope(Scope::UserTopRead) {
            return Err(Error::unauthorized(format!(
                "credential lacks the {} scope",
                Scope::UserTopRead
            )));
        }
        require_token(credential)?;

        let path = format!("/me/top/tracks?time_range=short_term&limit={TOP_TRACK_SEEDS}");
        let top: Paging<TrackObject> = self.get(credential, &path).await?;

        if top.total == Some(0) {
            return Err(Error::not_found("no listening history"));
        }

        let seeds: Vec<String> = top
            .items
            .into_iter()
            .filter_map(|t| t.id)
            .take(TOP_TRACK_SEEDS as usize)
            .collect();
        if seeds.is_empty() {
            return Err(Error::not_found("no listening history"));
        }

        self.recommendations(credential, &seeds).await
    }

    async fn recommendations(&self, credential: &Credential, seeds: &[String]) -> Result<Vec<TrackRef>> {
        let path = format!(
            "/recommendations?limit={limit}&seed_tracks={seeds}",
            limit = RECOMMENDATION_LIMIT,
            seeds = urlencoding::encode(&utils::join_seeds(seeds))
        );
        let response: TracksResponse = self.get(credential, &path).await?;

        if response.tracks.is_empty() {
            return Err(Error::not_found("no recommendations for these seeds"));
        }

        Ok(response.tracks.into_iter().map(TrackRef::from).collect())
    }
}
