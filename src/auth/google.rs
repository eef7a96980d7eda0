//! # Google OAuth 2.0 handshake
//!
//! The authorization-code flow with PKCE. This module is the boundary to the
//! identity provider: it produces an [`ExternalIdentity`] (the provider's
//! stable account id plus current profile fields) and never touches the
//! users table itself; the login callback feeds the result to the identity
//! store.
//!
//! ## Flow
//!
//! 1. [`authorize_url`](GoogleOAuth::authorize_url) builds an authorization
//!    URL requesting the `openid` and `profile` scopes, generates a random
//!    PKCE challenge, and persists the CSRF state plus verifier through the
//!    [`Datastore`] with a ten-minute expiry.
//! 2. [`exchange_code`](GoogleOAuth::exchange_code), called by the
//!    `/auth/google/callback` route:
//!    - atomically consumes the matching pending state (validating CSRF
//!      state and expiry in one operation),
//!    - exchanges the authorization code plus PKCE verifier for an access
//!      token,
//!    - fetches the account's profile from the Google userinfo endpoint.

use chrono::Duration;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::error::StoreError;
use crate::models::Profile;
use crate::settings::Settings;
use crate::store::Datastore;

use super::config::OAuthConfig;

/// Pending login states expire after this many minutes.
const LOGIN_STATE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid oauth configuration: {0}")]
    Config(#[from] oauth2::url::ParseError),
    #[error("login state is missing or expired")]
    StaleLoginState,
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the provider reports about the signed-in account.
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub external_id: String,
    pub profile: Profile,
}

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    name: Option<String>,
    given_name: Option<String>,
    picture: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth handler.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    config: OAuthConfig,
}

impl GoogleOAuth {
    pub fn new(settings: &Settings) -> Result<Self, AuthError> {
        let config = OAuthConfig::google(settings)?;
        Ok(Self { config })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate the authorization URL with PKCE, persisting the pending
    /// login state through the store.
    pub async fn authorize_url<S: Datastore>(&self, store: &S) -> Result<String, AuthError> {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        store
            .save_login_state(
                csrf_state.secret(),
                pkce_verifier.secret(),
                Duration::minutes(LOGIN_STATE_TTL_MINUTES),
            )
            .await?;

        Ok(auth_url.to_string())
    }

    /// Exchange the callback code for the account's external identity.
    pub async fn exchange_code<S: Datastore>(
        &self,
        store: &S,
        code: &str,
        state: &str,
    ) -> Result<ExternalIdentity, AuthError> {
        let pkce_verifier = store
            .take_login_state(state)
            .await?
            .ok_or(AuthError::StaleLoginState)?;

        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let client = self.create_client();

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let access_token = token_result.access_token().secret();

        // Fetch the profile from the Google userinfo endpoint
        let api_client = Client::new();
        let google_user: GoogleUser = api_client
            .get("https://www.googleapis.com/oauth2/v2/userinfo")
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?
            .json()
            .await?;

        Ok(ExternalIdentity {
            external_id: google_user.id,
            profile: Profile {
                display_name: google_user.name.unwrap_or_default(),
                first_name: google_user.given_name.unwrap_or_default(),
                image: google_user.picture,
            },
        })
    }
}
