use async_trait::async_trait;
use tracing::debug;

use super::{AuthProvider, SPOTIFY_SCOPES, SpotifyClient};
use crate::{
    error::AuthError,
    types::{Token, TokenResponse},
};

/// Lifetime assumed when the token endpoint does not report one.
const DEFAULT_EXPIRES_IN: u64 = 3600;

#[async_trait]
impl AuthProvider for SpotifyClient {
    /// Builds the authorization URL for the code flow.
    ///
    /// # Example
    ///
    /// ```text
    /// https://accounts.spotify.com/authorize?client_id=abc&response_type=code
    ///     &redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Fcallback&state=...
    ///     &scope=user-top-read+user-read-recently-played
    /// ```
    fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("state", state),
            ("scope", SPOTIFY_SCOPES),
        ];

        let mut url = self.auth_url.clone();
        url.query_pairs_mut().extend_pairs(params);
        url.to_string()
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Sends one form-encoded `authorization_code` grant with the client
    /// credentials. Any non-success status, a missing `access_token`, or a
    /// network error is returned as an [`AuthError`].
    async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        debug!("exchanging authorization code");

        let res = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: TokenResponse = res.json().await?;
        let access_token = json
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingField("access_token"))?;

        Ok(Token {
            access_token,
            scope: json.scope.unwrap_or_default(),
            expires_in: json.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        })
    }
}
