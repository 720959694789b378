//! OAuth2 protected-resource client
//!
//! The strategy never talks HTTP directly: it goes through an [`OAuth2Client`], which
//! keeps the provider call substitutable in tests.

use super::errors::TransportError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;

/// Capability to GET a protected resource with an OAuth2 access token
#[async_trait]
pub trait OAuth2Client: Send + Sync {
    /// Fetch `url` on behalf of `access_token` and return the response body
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails or the provider answers with a
    /// non-success status.
    async fn get(&self, url: &str, access_token: &str) -> Result<String, TransportError>;

    /// Alias of [`OAuth2Client::get`]
    ///
    /// # Errors
    ///
    /// Same as [`OAuth2Client::get`].
    async fn get_protected_resource(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<String, TransportError> {
        self.get(url, access_token).await
    }
}

/// [`OAuth2Client`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestOAuth2Client {
    http_client: reqwest::Client,
    use_authorization_header_for_get: bool,
    access_token_name: String,
}

impl Default for ReqwestOAuth2Client {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestOAuth2Client {
    /// Create a client that sends the token as a query parameter until
    /// [`use_authorization_header_for_get`](Self::use_authorization_header_for_get) is enabled
    #[must_use]
    pub fn new() -> Self {
        Self::with_http_client(reqwest::Client::new())
    }

    /// Wrap an already configured `reqwest::Client`
    #[must_use]
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            use_authorization_header_for_get: false,
            access_token_name: "access_token".to_string(),
        }
    }

    /// Create a client whose requests time out after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialised
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(builder.build()?))
    }

    /// Send the token as `Authorization: Bearer` instead of a query parameter on GET
    #[must_use]
    pub fn use_authorization_header_for_get(mut self, enabled: bool) -> Self {
        self.use_authorization_header_for_get = enabled;
        self
    }

    /// Whether GET requests carry the token in the `Authorization` header
    #[must_use]
    pub const fn uses_authorization_header_for_get(&self) -> bool {
        self.use_authorization_header_for_get
    }

    /// Query parameter name used when the token is not sent as a header
    #[must_use]
    pub fn with_access_token_name(mut self, name: impl Into<String>) -> Self {
        self.access_token_name = name.into();
        self
    }

    fn build_request(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let request = if self.use_authorization_header_for_get {
            self.http_client
                .get(url)
                .header(AUTHORIZATION, format!("Bearer {access_token}"))
        } else {
            let mut parsed = url::Url::parse(url)
                .map_err(|e| TransportError::Other(format!("Invalid resource URL {url}: {e}")))?;
            parsed
                .query_pairs_mut()
                .append_pair(&self.access_token_name, access_token);
            self.http_client.get(parsed)
        };

        Ok(request.header(ACCEPT, "application/json"))
    }
}

#[async_trait]
impl OAuth2Client for ReqwestOAuth2Client {
    async fn get(&self, url: &str, access_token: &str) -> Result<String, TransportError> {
        debug!("Fetching protected resource: {url}");

        let response = self.build_request(url, access_token)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!("Protected resource request failed with status: {status}");
            Err(TransportError::Status {
                status_code: status.as_u16(),
                data: body,
            })
        }
    }
}
