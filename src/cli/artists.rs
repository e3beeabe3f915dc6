use tabled::Table;

use crate::{
    cli::{Session, report, spinner},
    info,
    types::{
        ArtistRef, ArtistResolution, ArtistTableRow, ReleaseRef, ReleaseTableRow, TrackRef,
        TrackTableRow,
    },
    utils,
};

pub(crate) fn artist_rows<'a>(artists: impl Iterator<Item = &'a ArtistRef>) -> Vec<ArtistTableRow> {
    artists
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            number: i + 1,
            name: a.name.clone(),
            followers: utils::format_followers(a.follower_count),
            popularity: a.popularity,
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(", "),
        })
        .collect()
}

pub(crate) fn track_rows(tracks: &[TrackRef]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artist: t.primary_artist_name.clone(),
            album: t.album_name.clone(),
            released: t.release_date.clone(),
            link: t.external_url.clone(),
        })
        .collect()
}

pub(crate) fn release_rows(releases: Vec<ReleaseRef>) -> Vec<ReleaseTableRow> {
    releases.into_iter().map(ReleaseTableRow::from).collect()
}

pub async fn search_artists(session: Session, name: String) {
    let result = async {
        let credential = session.catalog_credential().await?;
        session.client.search_artists(&credential, &name).await
    };
    let pb = spinner("Searching artists...");
    let result = result.await;
    pb.finish_and_clear();

    match result {
        Ok(candidates) => println!("{}", Table::new(artist_rows(candidates.iter()))),
        Err(e) => report(&e),
    }
}

pub async fn top_tracks(session: Session, artist: String) {
    let result = async {
        let credential = session.catalog_credential().await?;
        session.client.get_top_tracks(&credential, &artist).await
    };
    let pb = spinner("Fetching top tracks...");
    let result = result.await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => println!("{}", Table::new(track_rows(&tracks))),
        Err(e) => report(&e),
    }
}

/// Related artists of the best match for `artist`.
pub async fn related(session: Session, artist: String) {
    let result = async {
        let credential = session.catalog_credential().await?;
        let seed = session.client.resolve_artist(&credential, &artist).await?;
        let seed_id = seed.primary().map(|a| a.id.clone()).unwrap_or_default();
        session.client.get_related_artists(&credential, &seed_id).await
    };
    let pb = spinner("Fetching related artists...");
    let result = result.await;
    pb.finish_and_clear();

    match result {
        Ok(related) => {
            let exact: Vec<&ArtistRef> = related.iter().filter_map(ArtistResolution::primary).collect();
            println!("{}", Table::new(artist_rows(exact.into_iter())));
            let ambiguous = related.iter().filter(|r| !r.is_exact()).count();
            if ambiguous > 0 {
                info!("{} entries had no exact match; showing their best candidate", ambiguous);
            }
        }
        Err(e) => report(&e),
    }
}

pub async fn releases(session: Session, artist: String) {
    let result = async {
        let credential = session.catalog_credential().await?;
        let resolved = session.client.resolve_artist(&credential, &artist).await?;
        let primary = resolved.into_primary().unwrap_or_default();
        session.client.get_artist_releases(&credential, &primary).await
    };
    let pb = spinner("Fetching releases...");
    let result = result.await;
    pb.finish_and_clear();

    match result {
        Ok(releases) => println!("{}", Table::new(release_rows(releases))),
        Err(e) => report(&e),
    }
}
