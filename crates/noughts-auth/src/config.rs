//! OAuth2 endpoint configuration.

use url::Url;

/// Configuration for the identity provider's OAuth2 surface.
///
/// Required fields are constructor parameters — no runtime "missing
/// field" errors. All endpoints are deployment-specific, so there are no
/// baked-in defaults.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    client_id: String,
    token_url: Url,
    logout_endpoint: Url,
    redirect_uri: Url,
    logout_uri: Url,
}

impl OAuthConfig {
    /// Creates a new OAuth2 configuration.
    ///
    /// - `token_url` — the provider's token endpoint (form-encoded POST)
    /// - `logout_endpoint` — the provider's logout page (navigation target)
    /// - `redirect_uri` — where the provider sends the authorization code
    /// - `logout_uri` — where the provider sends the user after logout
    pub fn new(
        client_id: impl Into<String>,
        token_url: Url,
        logout_endpoint: Url,
        redirect_uri: Url,
        logout_uri: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            token_url,
            logout_endpoint,
            redirect_uri,
            logout_uri,
        }
    }

    /// OAuth2 client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Token exchange endpoint URL.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// OAuth2 redirect URI (sent with the authorization-code grant).
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// The full logout navigation target:
    /// `<logout_endpoint>?client_id=<id>&logout_uri=<uri>`.
    pub fn logout_url(&self) -> Url {
        let mut url = self.logout_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("logout_uri", self.logout_uri.as_str());
        url
    }
}
