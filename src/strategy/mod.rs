//! Yahoo token strategy
//!
//! Authenticates a request carrying a Yahoo access token and account GUID:
//! extract credentials, fetch and normalize the profile, ask the verifier, and
//! report one of three outcomes (success, fail, error).

pub mod credentials;
pub mod options;
pub mod outcome;

pub use credentials::{extract_credentials, AuthRequest, Credentials, CredentialsMissing};
pub use options::{ConfigError, StrategyOptions};
pub use outcome::{
    AuthOutcome, AuthenticationHost, StrategyError, Verification, Verifier, VerifyContext,
};

use crate::oauth::{InternalOAuthError, OAuth2Client, ReqwestOAuth2Client};
use crate::profile::{normalize_profile, CanonicalProfile, ProfileError};
use crate::utils::logging::LoggingHelper;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub const STRATEGY_NAME: &str = "yahoo-token";

/// Authentication strategy validating Yahoo access tokens against the profile API.
///
/// Holds only configuration, the client and the verifier, so one instance can serve
/// any number of concurrent attempts.
pub struct YahooTokenStrategy<V> {
    options: StrategyOptions,
    client: Arc<dyn OAuth2Client>,
    verifier: V,
}

impl<V: Verifier> YahooTokenStrategy<V> {
    /// Create a strategy with a reqwest client sending the token as a bearer header
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid
    pub fn new(options: StrategyOptions, verifier: V) -> Result<Self, ConfigError> {
        Self::with_timeout(options, None, verifier)
    }

    /// Same as [`new`](Self::new) with a request timeout for the profile call
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the HTTP client cannot be built
    pub fn with_timeout(
        options: StrategyOptions,
        timeout: Option<Duration>,
        verifier: V,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let client =
            ReqwestOAuth2Client::with_timeout(timeout)?.use_authorization_header_for_get(true);
        Self::with_client(options, Arc::new(client), verifier)
    }

    /// Create a strategy over an existing client.
    /// The client is expected to send the access token in the `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid
    pub fn with_client(
        options: StrategyOptions,
        client: Arc<dyn OAuth2Client>,
        verifier: V,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        LoggingHelper::log_strategy_configured(STRATEGY_NAME, &options);
        Ok(Self {
            options,
            client,
            verifier,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    #[must_use]
    pub const fn options(&self) -> &StrategyOptions {
        &self.options
    }

    #[must_use]
    pub const fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Fetch and normalize the Yahoo profile of `account_id`. One request, no retries.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Transport`] if the provider call fails, and
    /// [`ProfileError::Parse`] or [`ProfileError::MissingField`] if the body is malformed.
    pub async fn user_profile(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<CanonicalProfile, ProfileError> {
        let url = self.options.profile_url_for(account_id);
        let body = self
            .client
            .get(&url, access_token)
            .await
            .map_err(InternalOAuthError::from_transport)?;

        normalize_profile(&body)
    }

    /// Run one authentication attempt over `request`
    pub async fn authenticate(&self, request: &AuthRequest) -> AuthOutcome<V::User> {
        let credentials = match extract_credentials(request, &self.options) {
            Ok(credentials) => credentials,
            Err(missing) => {
                LoggingHelper::log_credentials_missing(&missing);
                return AuthOutcome::Fail {
                    info: Some(json!({ "message": missing.to_string() })),
                };
            }
        };

        LoggingHelper::log_profile_fetch_start(
            &credentials.account_id,
            credentials.refresh_token.is_some(),
        );
        let profile = match self
            .user_profile(&credentials.access_token, &credentials.account_id)
            .await
        {
            Ok(profile) => profile,
            Err(error) => {
                LoggingHelper::log_profile_fetch_failed(&credentials.account_id, &error);
                return AuthOutcome::Error(error.into());
            }
        };
        LoggingHelper::log_profile_fetched(&profile);

        let context = VerifyContext {
            request: self.options.pass_request_to_callback.then_some(request),
            access_token: &credentials.access_token,
            refresh_token: credentials.refresh_token.as_deref(),
            profile,
        };

        match self.verifier.verify(context).await {
            Ok(Verification::Accepted { user, info }) => {
                LoggingHelper::log_verification_result(&credentials.account_id, true);
                AuthOutcome::Success { user, info }
            }
            Ok(Verification::Rejected { info }) => {
                LoggingHelper::log_verification_result(&credentials.account_id, false);
                AuthOutcome::Fail { info }
            }
            Err(error) => {
                LoggingHelper::log_verification_error(&credentials.account_id, &error);
                AuthOutcome::Error(StrategyError::Verification(error))
            }
        }
    }

    /// Run one attempt and forward its outcome to `host`
    pub async fn authenticate_with<H>(&self, request: &AuthRequest, host: &mut H)
    where
        H: AuthenticationHost<V::User> + ?Sized + Send,
    {
        self.authenticate(request).await.dispatch(host);
    }
}
