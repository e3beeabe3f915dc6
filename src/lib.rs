//! Spotufy Library
//!
//! Client-side orchestration over the Spotify Web API and a lyrics service:
//! token acquisition, free-text → entity resolution, composite catalog reads,
//! and playlist creation with explicit partial-failure reporting.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local authorization callback server
//! - `cli` - Command-line presentation of every operation
//! - `config` - Environment loading and the explicit [`config::Config`]
//! - `error` - Error taxonomy and the crate [`Result`] alias
//! - `lyrics` - Lyrics adapter and the LRCLib-backed source
//! - `management` - Credential cache bounded by the credential's expiry
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Transport, token manager, resolver, catalog and playlist builder
//! - `types` - Entity records and wire types
//! - `utils` - Small helpers shared by the above
//!
//! # Example
//!
//! ```
//! use spotufy::{config::Config, spotify::{SpotifyClient, auth::TokenManager, transport::HttpTransport}};
//!
//! #[tokio::main]
//! async fn main() -> spotufy::Result<()> {
//!     let config = Config::from_env()?;
//!     let transport = HttpTransport::new(config.timeout)?;
//!     let tokens = TokenManager::new(transport.clone(), config.clone());
//!     let credential = tokens.acquire_app_token().await?;
//!     let client = SpotifyClient::new(transport, &config.api_url);
//!     let tracks = client.get_top_tracks(&credential, "Al Green").await?;
//!     println!("{} top tracks", tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Searching for {}...", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line with a red exclamation mark and exits with status 1.
///
/// Only for failures the CLI cannot continue from, such as missing
/// configuration. Library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line with a yellow exclamation mark.
///
/// ```
/// warning!("Playlist {} was left empty", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
