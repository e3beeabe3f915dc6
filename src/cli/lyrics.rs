use crate::{
    cli::{Session, report, spinner},
    lyrics::{LrcLibSource, fetch_lyrics},
};

pub async fn lyrics(session: Session, artist: String, track: String) {
    let source = LrcLibSource::new(session.transport.clone(), &session.config.lyrics_url);

    let pb = spinner("Looking up lyrics...");
    let result = fetch_lyrics(&source, &artist, &track).await;
    pb.finish_and_clear();

    match result {
        Ok(text) => println!("{text}"),
        Err(e) => report(&e),
    }
}
