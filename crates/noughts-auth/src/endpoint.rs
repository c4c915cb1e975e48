//! HTTP client for the identity provider's token endpoint.

use serde::Deserialize;

use crate::{AuthError, OAuthConfig};

/// Token response from the provider's token endpoint.
///
/// `refresh_token` is only present on the authorization-code grant; the
/// refresh grant returns new access/identity tokens without rotating it.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub id_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
}

/// Which OAuth2 grant a request carries. Decides both the form
/// parameters and which [`AuthError`] variant a failure maps to.
#[derive(Debug, Clone, Copy)]
enum Grant {
    AuthorizationCode,
    RefreshToken,
}

impl Grant {
    fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }

    fn error(self, detail: String) -> AuthError {
        match self {
            Self::AuthorizationCode => AuthError::Exchange(detail),
            Self::RefreshToken => AuthError::Refresh(detail),
        }
    }
}

/// Thin wrapper over `reqwest` for the two token-endpoint grants.
pub(crate) struct TokenEndpoint {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl TokenEndpoint {
    pub(crate) fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Exchanges a one-time authorization code for a full token set.
    pub(crate) async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthError> {
        let grant = Grant::AuthorizationCode;
        let params = [
            ("grant_type", grant.as_str()),
            ("client_id", self.config.client_id()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri().as_str()),
        ];
        self.post_form(&params, grant).await
    }

    /// Exchanges a refresh token for fresh access/identity tokens.
    pub(crate) async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        let grant = Grant::RefreshToken;
        let params = [
            ("grant_type", grant.as_str()),
            ("client_id", self.config.client_id()),
            ("refresh_token", refresh_token),
        ];
        self.post_form(&params, grant).await
    }

    async fn post_form(
        &self,
        params: &[(&str, &str)],
        grant: Grant,
    ) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(self.config.token_url().clone())
            .form(params)
            .send()
            .await
            .map_err(|e| grant.error(format!("transport failure: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(grant.error(format!("HTTP {status}: {body}")));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| grant.error(format!("malformed token response: {e}")))
    }
}
