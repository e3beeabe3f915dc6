//! Configuration management for Spotufy.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! - Linux: `~/.local/share/spotufy/.env`
//! - macOS: `~/Library/Application Support/spotufy/.env`
//! - Windows: `%LOCALAPPDATA%/spotufy/.env`
//!
//! Everything is collected once into a [`Config`] which is handed to the
//! components that need it. Nothing reads secrets from the environment after
//! startup.

use std::{env, path::PathBuf, time::Duration};

use crate::{
    error::{Error, Result},
    spotify::transport::DEFAULT_TIMEOUT,
    types::Scope,
};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_LYRICS_URL: &str = "https://lrclib.net/api";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:9191/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:9191";

/// Loads environment variables from `spotufy/.env` in the local data
/// directory. A missing file is not an error; the process environment alone
/// may carry everything.
pub async fn load_env() -> Result<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotufy/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::ConfigMissing(format!("{}: {}", parent.display(), e)))?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::ConfigMissing(format!("{}: {}", path.display(), e)))?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub server_address: String,
    pub scopes: Vec<Scope>,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub lyrics_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            scopes: Scope::ALL.to_vec(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            lyrics_url: DEFAULT_LYRICS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// `ConfigMissing` when the client id or secret is unset, or when
    /// `HTTP_TIMEOUT_SECS` is not a positive number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| Error::ConfigMissing(key.to_string()));
        let defaults = Config::default();

        let timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::ConfigMissing(format!(
                        "HTTP_TIMEOUT_SECS must be a positive integer, got {secs:?}"
                    )));
                }
            },
            None => defaults.timeout,
        };

        Ok(Self {
            client_id: require("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: require("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: get("SPOTIFY_API_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            server_address: get("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            scopes: defaults.scopes,
            api_url: get("SPOTIFY_API_URL").unwrap_or(defaults.api_url),
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or(defaults.auth_url),
            token_url: get("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.token_url),
            lyrics_url: get("LYRICS_API_URL").unwrap_or(defaults.lyrics_url),
            timeout,
        })
    }
}
