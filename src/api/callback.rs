use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{server::CallbackState, warning};

/// Receives the redirect from the authorization page and exchanges the code
/// for a credential.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared): Extension<CallbackState>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was declined: {}", reason);
        return Html("<h4>Authorization declined.</h4>");
    }

    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut auth = shared.auth.lock().await;
    if !auth.awaits(state) {
        warning!("Ignoring callback with unexpected state");
        return Html("<h4>Unexpected authorization state.</h4>");
    }

    match shared.tokens.complete_user_authorization(code).await {
        Ok(credential) => {
            auth.complete(credential);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
