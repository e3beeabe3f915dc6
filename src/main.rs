use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotufy::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Forget the stored credential
    Logout,

    /// Search artists by name
    Artists { name: String },

    /// Most popular tracks of an artist
    TopTracks { name: String },

    /// Details of a single track
    Track(TrackOptions),

    /// Recommendations based on a track
    Recommend(RecommendOptions),

    /// Recommendations based on your recently most played tracks
    MyRecommendations {
        /// Save the recommendations as a playlist
        #[clap(long)]
        playlist: bool,
    },

    /// Artists related to an artist
    Related { name: String },

    /// Albums, singles and appearances of an artist
    Releases { name: String },

    /// Globally featured new releases
    NewReleases,

    /// Lyrics of a song
    Lyrics(LyricsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Seed track name
    #[clap(long)]
    pub track: String,

    /// Artist of the seed track
    #[clap(long)]
    pub artist: String,

    /// Save the recommendations as a playlist
    #[clap(long)]
    pub playlist: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LyricsOptions {
    #[clap(long)]
    pub artist: String,
    #[clap(long)]
    pub track: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // completions need no credentials
    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let session = match cli::Session::new(config) {
        Ok(session) => session,
        Err(e) => error!("Cannot set up HTTP client. Err: {}", e),
    };

    match cli.command {
        Command::Auth => cli::auth(session).await,
        Command::Logout => cli::logout(session).await,
        Command::Artists { name } => cli::search_artists(session, name).await,
        Command::TopTracks { name } => cli::top_tracks(session, name).await,
        Command::Track(opt) => cli::track_details(session, opt.name, opt.artist).await,
        Command::Recommend(opt) => {
            cli::recommend(session, opt.track, opt.artist, opt.playlist).await
        }
        Command::MyRecommendations { playlist } => {
            cli::my_recommendations(session, playlist).await
        }
        Command::Related { name } => cli::related(session, name).await,
        Command::Releases { name } => cli::releases(session, name).await,
        Command::NewReleases => cli::new_releases(session).await,
        Command::Lyrics(opt) => cli::lyrics(session, opt.artist, opt.track).await,
        Command::Completions(_) => {}
    }
}
