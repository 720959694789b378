use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_AUTHORIZATION_URL: &str = "https://api.login.yahoo.com/oauth2/request_auth";
pub const DEFAULT_TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";
pub const DEFAULT_PROFILE_URL: &str =
    "https://social.yahooapis.com/v1/user/:accountId/profile?format=json";

/// Placeholder substituted with the account identifier in `profile_url`
pub const ACCOUNT_ID_PLACEHOLDER: &str = ":accountId";
/// Older placeholder name, still honoured in custom `profile_url` templates
pub const LEGACY_ACCOUNT_ID_PLACEHOLDER: &str = ":xoauthYahooGuid";

/// Strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
    /// Yahoo application client ID
    pub client_id: String,
    /// Yahoo application client secret
    pub client_secret: String,
    /// Forward the inbound request to the verifier
    pub pass_request_to_callback: bool,
    pub access_token_field: String,
    pub refresh_token_field: String,
    /// Request field carrying the Yahoo GUID
    pub account_id_field: String,
    /// Profile endpoint template, see [`ACCOUNT_ID_PLACEHOLDER`]
    pub profile_url: String,
    pub authorization_url: String,
    pub token_url: String,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            pass_request_to_callback: false,
            access_token_field: "access_token".to_string(),
            refresh_token_field: "refresh_token".to_string(),
            account_id_field: "xoauth_yahoo_guid".to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            authorization_url: DEFAULT_AUTHORIZATION_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

/// Invalid strategy configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("client_id is required")]
    MissingClientId,
    #[error("client_secret is required")]
    MissingClientSecret,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl StrategyOptions {
    /// Options with the given client credentials and defaults for everything else
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pass_request_to_callback(mut self, enabled: bool) -> Self {
        self.pass_request_to_callback = enabled;
        self
    }

    #[must_use]
    pub fn with_profile_url(mut self, profile_url: impl Into<String>) -> Self {
        self.profile_url = profile_url.into();
        self
    }

    /// Override the request field names used for credential lookup
    #[must_use]
    pub fn with_field_names(
        mut self,
        access_token_field: impl Into<String>,
        refresh_token_field: impl Into<String>,
        account_id_field: impl Into<String>,
    ) -> Self {
        self.access_token_field = access_token_field.into();
        self.refresh_token_field = refresh_token_field.into();
        self.account_id_field = account_id_field.into();
        self
    }

    /// Check that the options can drive a strategy
    ///
    /// # Errors
    ///
    /// Returns an error if the client credentials, a field name, or the profile URL is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        if self.client_secret.trim().is_empty() {
            return Err(ConfigError::MissingClientSecret);
        }

        let required = [
            ("access_token_field", &self.access_token_field),
            ("refresh_token_field", &self.refresh_token_field),
            ("account_id_field", &self.account_id_field),
            ("profile_url", &self.profile_url),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }

        Ok(())
    }

    /// Profile endpoint for one account
    #[must_use]
    pub fn profile_url_for(&self, account_id: &str) -> String {
        let encoded = urlencoding::encode(account_id);
        self.profile_url
            .replace(LEGACY_ACCOUNT_ID_PLACEHOLDER, &encoded)
            .replace(ACCOUNT_ID_PLACEHOLDER, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = StrategyOptions::default();

        assert_eq!(options.access_token_field, "access_token");
        assert_eq!(options.refresh_token_field, "refresh_token");
        assert_eq!(options.account_id_field, "xoauth_yahoo_guid");
        assert!(!options.pass_request_to_callback);
        assert_eq!(options.authorization_url, DEFAULT_AUTHORIZATION_URL);
        assert_eq!(options.token_url, DEFAULT_TOKEN_URL);
    }

    #[test]
    fn test_validate_requires_client_credentials() {
        assert!(matches!(
            StrategyOptions::default().validate(),
            Err(ConfigError::MissingClientId)
        ));
        assert!(matches!(
            StrategyOptions::new("123", " ").validate(),
            Err(ConfigError::MissingClientSecret)
        ));
        assert!(StrategyOptions::new("123", "123").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_field_names() {
        let options = StrategyOptions::new("123", "123").with_field_names("token", "", "guid");

        assert!(matches!(
            options.validate(),
            Err(ConfigError::EmptyField("refresh_token_field"))
        ));
    }

    #[test]
    fn test_profile_url_substitution() {
        let options = StrategyOptions::new("123", "123");

        assert_eq!(
            options.profile_url_for("SCQ4A46XAEDWNYKPZ6PJ4JHC4E"),
            "https://social.yahooapis.com/v1/user/SCQ4A46XAEDWNYKPZ6PJ4JHC4E/profile?format=json"
        );
    }

    #[test]
    fn test_profile_url_legacy_placeholder_and_encoding() {
        let options = StrategyOptions::new("123", "123")
            .with_profile_url("http://localhost/v1/user/:xoauthYahooGuid/profile");

        assert_eq!(
            options.profile_url_for("a/b c"),
            "http://localhost/v1/user/a%2Fb%20c/profile"
        );
    }
}
