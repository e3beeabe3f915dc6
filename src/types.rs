use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// Placeholder for any image the remote catalog did not provide.
pub const IMAGE_NOT_FOUND: &str = "Image not found";

/// OAuth scopes this client ever asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "playlist-modify-public")]
    PlaylistModifyPublic,
    #[serde(rename = "playlist-modify-private")]
    PlaylistModifyPrivate,
    #[serde(rename = "user-top-read")]
    UserTopRead,
}

impl Scope {
    pub const ALL: [Scope; 3] = [
        Scope::PlaylistModifyPublic,
        Scope::PlaylistModifyPrivate,
        Scope::UserTopRead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::PlaylistModifyPublic => "playlist-modify-public",
            Scope::PlaylistModifyPrivate => "playlist-modify-private",
            Scope::UserTopRead => "user-top-read",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| format!("unknown scope: {s}"))
    }
}

/// Bearer credential for the catalog API. Never mutated once issued; a stale
/// credential is replaced, not refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub scope: BTreeSet<Scope>,
    pub expiry: DateTime<Utc>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, scope: BTreeSet<Scope>, expires_in: i64) -> Self {
        Self {
            access_token: access_token.into(),
            scope,
            expiry: Utc::now() + Duration::seconds(expires_in),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiry
    }

    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scope.contains(&scope)
    }

    /// Any playlist-modify scope allows creating a playlist.
    pub fn can_modify_playlists(&self) -> bool {
        self.has_scope(Scope::PlaylistModifyPublic) || self.has_scope(Scope::PlaylistModifyPrivate)
    }
}

/// Where the user's agent has to go to grant access, and the `state` value the
/// callback must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInstruction {
    pub url: String,
    pub state: String,
}

/// Image link that is either present or explicitly marked as missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageUrl {
    Url(String),
    #[default]
    NotFound,
}

impl ImageUrl {
    pub fn from_images(images: &[Image], preferred: usize) -> Self {
        images
            .get(preferred)
            .or_else(|| images.first())
            .and_then(|image| image.url.clone())
            .filter(|url| !url.is_empty())
            .map_or(ImageUrl::NotFound, ImageUrl::Url)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageUrl::Url(url) => Some(url),
            ImageUrl::NotFound => None,
        }
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageUrl::Url(url) => f.write_str(url),
            ImageUrl::NotFound => f.write_str(IMAGE_NOT_FOUND),
        }
    }
}

impl From<String> for ImageUrl {
    fn from(value: String) -> Self {
        if value.is_empty() || value == IMAGE_NOT_FOUND {
            ImageUrl::NotFound
        } else {
            ImageUrl::Url(value)
        }
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub follower_count: u64,
    pub genres: Vec<String>,
    pub external_url: String,
    pub image_url: ImageUrl,
    pub uri: String,
}

/// The few artist fields embedded in albums and tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistLite {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRef {
    pub id: String,
    pub name: String,
    pub album_name: String,
    pub primary_artist_name: String,
    pub duration_seconds: f64,
    pub release_date: String,
    pub external_url: String,
    pub uri: String,
    pub image_url: ImageUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    Album,
    Single,
    Compilation,
    AppearsOn,
}

impl ReleaseType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "album" => Some(ReleaseType::Album),
            "single" => Some(ReleaseType::Single),
            "compilation" => Some(ReleaseType::Compilation),
            "appears_on" => Some(ReleaseType::AppearsOn),
            _ => None,
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseType::Album => "album",
            ReleaseType::Single => "single",
            ReleaseType::Compilation => "compilation",
            ReleaseType::AppearsOn => "appears_on",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRef {
    pub album_id: String,
    pub kind: ReleaseType,
    pub title: String,
    pub release_date: String,
    pub track_count: u32,
    pub external_url: String,
    pub cover_image_url: ImageUrl,
    pub contributing_artists: Vec<ArtistLite>,
}

/// Ambiguous search matches awaiting disambiguation by the caller.
///
/// Stored 0-based. [`CandidateSet::pick`] offers the 1-based numbering shown to
/// users, so "candidate 1" is the first real match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateSet<T> {
    items: Vec<T>,
}

impl<T> CandidateSet<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// 1-based access, matching the numbers printed next to each candidate.
    pub fn pick(&self, number: usize) -> Option<&T> {
        number.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for CandidateSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Outcome of resolving a free-text artist name.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtistResolution {
    /// The top result matched the input exactly (ignoring case).
    Exact(ArtistRef),
    Candidates(CandidateSet<ArtistRef>),
}

impl ArtistResolution {
    /// The exact match, or the first candidate otherwise.
    pub fn primary(&self) -> Option<&ArtistRef> {
        match self {
            ArtistResolution::Exact(artist) => Some(artist),
            ArtistResolution::Candidates(candidates) => candidates.first(),
        }
    }

    pub fn into_primary(self) -> Option<ArtistRef> {
        match self {
            ArtistResolution::Exact(artist) => Some(artist),
            ArtistResolution::Candidates(candidates) => candidates.into_iter().next(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, ArtistResolution::Exact(_))
    }
}

/// A freshly created playlist. Only lives for the duration of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistHandle {
    pub id: String,
    pub external_url: String,
}

// Wire types. Every field is optional or defaulted: absent keys never fail a
// decode, the records above receive sentinels instead.

/// Treats an explicit `null` like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub popularity: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub followers: Followers,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlbumObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub album_type: Option<String>,
    pub album_group: Option<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub duration_ms: Option<u64>,
    pub popularity: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
    pub uri: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub album: AlbumObject,
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paging<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub next: Option<String>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
            next: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub artists: Option<Paging<ArtistObject>>,
    pub tracks: Option<Paging<TrackObject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TracksResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewReleasesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub albums: Paging<AlbumObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatePlaylistResponse {
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub number: usize,
    pub name: String,
    pub followers: String,
    pub popularity: u32,
    pub genres: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub released: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct ReleaseTableRow {
    pub date: String,
    #[tabled(rename = "type")]
    pub kind: String,
    pub title: String,
    pub tracks: u32,
    pub artists: String,
}

impl From<ArtistObject> for ArtistRef {
    fn from(artist: ArtistObject) -> Self {
        ArtistRef {
            id: artist.id.unwrap_or_default(),
            name: artist.name.unwrap_or_default(),
            popularity: artist.popularity.unwrap_or_default(),
            follower_count: artist.followers.total.unwrap_or_default(),
            genres: artist.genres,
            external_url: artist.external_urls.spotify.unwrap_or_default(),
            image_url: ImageUrl::from_images(&artist.images, 0),
            uri: artist.uri.unwrap_or_default(),
        }
    }
}

impl From<SimpleArtist> for ArtistLite {
    fn from(artist: SimpleArtist) -> Self {
        ArtistLite {
            id: artist.id.unwrap_or_default(),
            name: artist.name.unwrap_or_default(),
            uri: artist.uri.unwrap_or_default(),
        }
    }
}

impl From<TrackObject> for TrackRef {
    fn from(track: TrackObject) -> Self {
        // Search results only reliably carry album artists.
        let primary_artist_name = track
            .artists
            .first()
            .or_else(|| track.album.artists.first())
            .and_then(|a| a.name.clone())
            .unwrap_or_default();

        TrackRef {
            id: track.id.unwrap_or_default(),
            name: track.name.unwrap_or_default(),
            album_name: track.album.name.unwrap_or_default(),
            primary_artist_name,
            duration_seconds: track.duration_ms.unwrap_or_default() as f64 / 1000.0,
            release_date: track.album.release_date.unwrap_or_default(),
            external_url: track.external_urls.spotify.unwrap_or_default(),
            uri: track.uri.unwrap_or_default(),
            // medium-sized cover when there is one
            image_url: ImageUrl::from_images(&track.album.images, 1),
        }
    }
}

impl From<AlbumObject> for ReleaseRef {
    fn from(album: AlbumObject) -> Self {
        let kind = album
            .album_group
            .as_deref()
            .or(album.album_type.as_deref())
            .and_then(ReleaseType::parse)
            .unwrap_or(ReleaseType::Album);

        ReleaseRef {
            album_id: album.id.unwrap_or_default(),
            kind,
            title: album.name.unwrap_or_default(),
            release_date: album.release_date.unwrap_or_default(),
            track_count: album.total_tracks.unwrap_or_default(),
            external_url: album.external_urls.spotify.unwrap_or_default(),
            cover_image_url: ImageUrl::from_images(&album.images, 0),
            contributing_artists: album.artists.into_iter().map(ArtistLite::from).collect(),
        }
    }
}

impl From<ReleaseRef> for ReleaseTableRow {
    fn from(release: ReleaseRef) -> Self {
        ReleaseTableRow {
            date: release.release_date,
            kind: release.kind.to_string(),
            title: release.title,
            tracks: release.track_count,
            artists: release
                .contributing_artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
