use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
    config::Config,
    error::{Error, Result},
    spotify::transport::{ApiRequest, Transport},
    types::{Credential, RedirectInstruction, Scope, TokenResponse},
    utils,
};

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Where a user session stands in the authorization-code flow.
///
/// There is no automatic way back from `Expired`: the holder must start a new
/// authorization.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    AuthorizationRequested {
        state: String,
    },
    Authenticated(Credential),
    Expired,
}

impl AuthState {
    pub fn request(&mut self, instruction: &RedirectInstruction) {
        *self = AuthState::AuthorizationRequested {
            state: instruction.state.clone(),
        };
    }

    /// Whether a callback carrying `state` belongs to the pending request.
    pub fn awaits(&self, state: &str) -> bool {
        matches!(self, AuthState::AuthorizationRequested { state: s } if s == state)
    }

    pub fn complete(&mut self, credential: Credential) {
        *self = AuthState::Authenticated(credential);
    }

    /// Called once a downstream call failed with `Unauthorized`.
    pub fn expire(&mut self) {
        if matches!(self, AuthState::Authenticated(_)) {
            *self = AuthState::Expired;
        }
    }

    pub fn logout(&mut self) {
        *self = AuthState::Unauthenticated;
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            AuthState::Authenticated(credential) => Some(credential),
            _ => None,
        }
    }
}

/// Acquires credentials from the accounts service.
///
/// Owns nothing but the configuration it was built with; every credential it
/// hands out belongs to the caller.
pub struct TokenManager<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> TokenManager<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Client-credentials grant: app-only access, no user context.
    pub async fn acquire_app_token(&self) -> Result<Credential> {
        let (client_id, client_secret) = self.client_secrets()?;

        let request = ApiRequest::post(&self.config.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ]);

        let json = self.exchange(request).await?;
        credential_from_response(json)
    }

    /// Builds the authorization URL for the configured scopes. No network
    /// call is made.
    pub fn begin_user_authorization(&self) -> Result<RedirectInstruction> {
        if self.config.client_id.is_empty() {
            return Err(Error::ConfigMissing(
                "SPOTIFY_API_AUTH_CLIENT_ID".to_string(),
            ));
        }

        let state = utils::generate_state();
        let scope = utils::join_scopes(&self.config.scopes);

        let url = format!(
            "{auth_url}?response_type=code&client_id={client_id}&scope={scope}&redirect_uri={redirect_uri}&state={state}&show_dialog=true",
            auth_url = self.config.auth_url,
            client_id = urlencoding::encode(&self.config.client_id),
            scope = urlencoding::encode(&scope),
            redirect_uri = urlencoding::encode(&self.config.redirect_uri),
            state = state,
        );

        Ok(RedirectInstruction { url, state })
    }

    /// Exchanges an authorization code for a user-context credential,
    /// authenticating the client with HTTP Basic auth.
    pub async fn complete_user_authorization(&self, code: &str) -> Result<Credential> {
        if code.is_empty() {
            return Err(Error::AuthRejected("empty authorization code".to_string()));
        }
        let (client_id, client_secret) = self.client_secrets()?;

        let request = ApiRequest::post(&self.config.token_url)
            .header(
                "Authorization",
                utils::basic_auth_header(client_id, client_secret),
            )
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ]);

        let json = self.exchange(request).await?;
        credential_from_response(json)
    }

    fn client_secrets(&self) -> Result<(&str, &str)> {
        if self.config.client_id.is_empty() {
            return Err(Error::ConfigMissing(
                "SPOTIFY_API_AUTH_CLIENT_ID".to_string(),
            ));
        }
        if self.config.client_secret.is_empty() {
            return Err(Error::ConfigMissing(
                "SPOTIFY_API_AUTH_CLIENT_SECRET".to_string(),
            ));
        }
        Ok((&self.config.client_id, &self.config.client_secret))
    }

    async fn exchange(&self, request: ApiRequest) -> Result<Value> {
        // a refused grant comes back as 400/401, which is a rejection rather
        // than a transport problem
        self.transport.send(request).await.map_err(|e| match e {
            Error::Transport {
                status: Some(status),
                message,
            } => Error::AuthRejected(format!("token endpoint replied HTTP {status}: {message}")),
            Error::Unauthorized(message) => Error::AuthRejected(message),
            other => other,
        })
    }
}

fn credential_from_response(json: Value) -> Result<Credential> {
    if json.is_null() {
        return Err(Error::AuthRejected("empty token response".to_string()));
    }
    let token: TokenResponse = serde_json::from_value(json)
        .map_err(|e| Error::AuthRejected(format!("malformed token response: {e}")))?;

    let access_token = token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::AuthRejected("no access token in response".to_string()))?;

    let scope: BTreeSet<Scope> = token
        .scope
        .as_deref()
        .map(utils::parse_scopes)
        .unwrap_or_default();

    log::debug!("credential issued with scope {:?}", scope);

    Ok(Credential::new(
        access_token,
        scope,
        token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
    ))
}
