//! # CLI Module
//!
//! Presentation layer of Spotufy: turns command-line input into calls on
//! [`crate::spotify::SpotifyClient`] and renders whatever comes back as
//! tables or status lines.
//!
//! ## Commands
//!
//! - [`auth`] / [`logout`] - obtain or forget a user credential
//! - [`search_artists`], [`top_tracks`], [`related`], [`releases`] - artist lookups
//! - [`track_details`], [`recommend`], [`my_recommendations`] - track lookups,
//!   the recommendation commands can save their result as a playlist
//! - [`new_releases`] - global new releases
//! - [`lyrics`] - song lyrics
//!
//! ## Credentials
//!
//! Read-only catalog commands use the stored user credential when there is a
//! valid one and fall back to a fresh app-only credential otherwise. Commands
//! acting on the user's account need the stored user credential.
//!
//! ## Errors
//!
//! Every failure is shown as the same "nothing found, try again" line, with a
//! hint to re-authenticate for `Unauthorized`. A playlist that was created but
//! could not be filled is reported together with its link.

mod artists;
mod auth;
mod lyrics;
mod playlist;
mod tracks;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config,
    error::{Error, Result},
    management::CredentialStore,
    spotify::{SpotifyClient, auth::TokenManager, transport::HttpTransport},
    types::Credential,
    warning,
};

pub use artists::{related, releases, search_artists, top_tracks};
pub use auth::{auth, logout};
pub use lyrics::lyrics;
pub use tracks::{my_recommendations, new_releases, recommend, track_details};

/// Everything a command needs, built once from the configuration.
pub struct Session {
    pub config: Config,
    pub client: SpotifyClient<HttpTransport>,
    pub tokens: Arc<TokenManager<HttpTransport>>,
    pub transport: HttpTransport,
    pub store: CredentialStore,
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self {
            client: SpotifyClient::new(transport.clone(), &config.api_url),
            tokens: Arc::new(TokenManager::new(transport.clone(), config.clone())),
            transport,
            store: CredentialStore::default(),
            config,
        })
    }

    /// Stored user credential if still valid, else a new app-only one.
    pub async fn catalog_credential(&self) -> Result<Credential> {
        match self.store.load().await {
            Ok(credential) => Ok(credential),
            Err(_) => self.tokens.acquire_app_token().await,
        }
    }

    pub async fn user_credential(&self) -> Result<Credential> {
        self.store.load().await
    }
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub(crate) fn report(err: &Error) {
    log::debug!("command failed: {err}");
    match err {
        Error::PartialFailure { playlist, .. } => {
            warning!(
                "The playlist was created but its tracks could not be added: {}",
                playlist.external_url
            );
        }
        Error::Unauthorized(_) => {
            warning!("Nothing found, try again. You may need to run `spotufy auth`.");
        }
        Error::ConfigMissing(what) => {
            warning!("Missing configuration: {}", what);
        }
        _ => warning!("Nothing found, try again."),
    }
}
