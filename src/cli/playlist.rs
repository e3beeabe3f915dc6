use crate::{
    cli::{Session, report, spinner},
    success,
    types::TrackRef,
    utils,
};

/// Saves `tracks` as "Recommended Songs based on <Input>".
pub(crate) async fn save_recommendations(session: &Session, based_on: &str, tracks: &[TrackRef]) {
    let credential = match session.user_credential().await {
        Ok(credential) => credential,
        Err(e) => return report(&e),
    };

    let name = format!("Recommended Songs based on {}", utils::title_case(based_on));
    let pb = spinner("Creating playlist...");
    let result = session.client.create_playlist(&credential, &name, tracks).await;
    pb.finish_and_clear();

    match result {
        Ok(url) => success!("Playlist \"{}\" created: {}", name, url),
        Err(e) => report(&e),
    }
}
