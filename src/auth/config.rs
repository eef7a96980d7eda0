//! OAuth provider configuration, sourced from [`Settings`].

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::settings::Settings;

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Google endpoints plus the client credentials and redirect from
    /// settings.
    pub fn google(settings: &Settings) -> Result<Self, oauth2::url::ParseError> {
        Ok(Self {
            client_id: ClientId::new(settings.google.id.clone()),
            client_secret: ClientSecret::new(settings.google.secret.clone()),
            auth_url: AuthUrl::new("https://accounts.google.com/o/oauth2/v2/auth".to_string())?,
            token_url: TokenUrl::new("https://oauth2.googleapis.com/token".to_string())?,
            redirect_url: RedirectUrl::new(settings.auth.redirect.clone())?,
        })
    }
}
