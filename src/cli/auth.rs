use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::Instant};

use crate::{
    cli::{Session, report},
    info,
    server::{CallbackState, start_api_server},
    spotify::auth::AuthState,
    success,
    types::Credential,
    warning,
};

const MAX_WAIT: Duration = Duration::from_secs(120);

/// Runs the authorization-code flow: local callback server, browser redirect,
/// code exchange, then stores the credential until it expires.
pub async fn auth(session: Session) {
    let instruction = match session.tokens.begin_user_authorization() {
        Ok(instruction) => instruction,
        Err(e) => return report(&e),
    };

    let shared = CallbackState {
        auth: Arc::new(Mutex::new(AuthState::default())),
        tokens: Arc::clone(&session.tokens),
    };
    shared.auth.lock().await.request(&instruction);

    let server_state = shared.clone();
    let address = session.config.server_address.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(&address, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&instruction.url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            instruction.url
        );
    } else {
        info!("Waiting for authorization in the browser...");
    }

    let Some(credential) = wait_for_credential(&shared.auth).await else {
        warning!("Authentication failed or timed out.");
        return;
    };

    if let Err(e) = session.store.persist(&credential).await {
        warning!("Failed to store credential: {}", e);
        return;
    }
    success!("Authentication successful!");
}

async fn wait_for_credential(auth: &Mutex<AuthState>) -> Option<Credential> {
    let start = Instant::now();

    while start.elapsed() < MAX_WAIT {
        if let Some(credential) = auth.lock().await.credential() {
            return Some(credential.clone());
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

pub async fn logout(session: Session) {
    match session.store.clear().await {
        Ok(()) => success!("Logged out."),
        Err(e) => report(&e),
    }
}
