use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{
    api,
    error::{Error, Result},
    spotify::{auth::{AuthState, TokenManager}, transport::HttpTransport},
};

/// Shared between the CLI waiting for a credential and the callback handler
/// producing it.
#[derive(Clone)]
pub struct CallbackState {
    pub auth: Arc<Mutex<AuthState>>,
    pub tokens: Arc<TokenManager<HttpTransport>>,
}

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

pub async fn start_api_server(address: &str, state: CallbackState) -> Result<()> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| Error::ConfigMissing(format!("SERVER_ADDRESS {address:?}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::debug!("callback server listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
