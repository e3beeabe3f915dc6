use tabled::Table;

use crate::{
    cli::{
        Session,
        artists::{release_rows, track_rows},
        playlist::save_recommendations,
        report, spinner,
    },
    types::TrackRef,
};

pub async fn track_details(session: Session, track: String, artist: String) {
    let result = async {
        let credential = session.catalog_credential().await?;
        session.client.resolve_track(&credential, &track, &artist).await
    };
    let pb = spinner("Searching track...");
    let result = result.await;
    pb.finish_and_clear();

    match result {
        Ok(track) => {
            println!("{}", Table::new(track_rows(std::slice::from_ref(&track))));
            println!(
                "Duration: {:.0}s   Cover: {}   URI: {}",
                track.duration_seconds, track.image_url, track.uri
            );
        }
        Err(e) => report(&e),
    }
}

pub async fn recommend(session: Session, track: String, artist: String, playlist: bool) {
    let result = async {
        let credential = session.catalog_credential().await?;
        session
            .client
            .get_track_recommendations(&credential, &track, &artist)
            .await
    };
    let pb = spinner("Fetching recommendations...");
    let result = result.await;
    pb.finish_and_clear();

    show_and_save(&session, result, playlist, &artist).await;
}

pub async fn my_recommendations(session: Session, playlist: bool) {
    let result = async {
        let credential = session.user_credential().await?;
        session.client.get_user_recommendations(&credential).await
    };
    let pb = spinner("Fetching your recommendations...");
    let result = result.await;
    pb.finish_and_clear();

    show_and_save(&session, result, playlist, "your top tracks").await;
}

async fn show_and_save(
    session: &Session,
    result: crate::Result<Vec<TrackRef>>,
    playlist: bool,
    based_on: &str,
) {
    match result {
        Ok(tracks) => {
            println!("{}", Table::new(track_rows(&tracks)));
            if playlist {
                save_recommendations(session, based_on, &tracks).await;
            }
        }
        Err(e) => report(&e),
    }
}

pub async fn new_releases(session: Session) {
    let result = async {
        let credential = session.catalog_credential().await?;
        session.client.get_new_releases(&credential).await
    };
    let pb = spinner("Fetching new releases...");
    let result = result.await;
    pb.finish_and_clear();

    match result {
        Ok(releases) => println!("{}", Table::new(release_rows(releases))),
        Err(e) => report(&e),
    }
}
