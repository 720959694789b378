//! Credential extraction from an inbound request
//!
//! Each field is looked up in the body, then the query string, then the headers.
//! The first non-empty value wins.

use super::options::StrategyOptions;
use std::collections::HashMap;
use thiserror::Error;

/// Framework-neutral view of an inbound authentication request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    pub body: Option<HashMap<String, String>>,
    pub query: Option<HashMap<String, String>>,
    /// Header names are stored lowercased
    pub headers: Option<HashMap<String, String>>,
}

impl AuthRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_body<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(collect_fields(fields, false));
        self
    }

    #[must_use]
    pub fn with_query<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query = Some(collect_fields(fields, false));
        self
    }

    #[must_use]
    pub fn with_headers<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = Some(collect_fields(fields, true));
        self
    }

    /// Look up `field` in body, query, then headers, skipping empty values
    #[must_use]
    pub fn lookup(&self, field: &str) -> Option<&str> {
        let header_name = field.to_ascii_lowercase();
        [
            self.body.as_ref().and_then(|body| body.get(field)),
            self.query.as_ref().and_then(|query| query.get(field)),
            self.headers.as_ref().and_then(|headers| headers.get(&header_name)),
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|value| !value.is_empty())
    }
}

fn collect_fields<K, V>(
    fields: impl IntoIterator<Item = (K, V)>,
    lowercase_keys: bool,
) -> HashMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .map(|(key, value)| {
            let key: String = key.into();
            let key = if lowercase_keys {
                key.to_ascii_lowercase()
            } else {
                key
            };
            (key, value.into())
        })
        .collect()
}

/// Credentials presented by the client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Yahoo GUID of the account the token belongs to
    pub account_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[redacted]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// The request lacks the access token or the account identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("You should provide {access_token_field} and {account_id_field}")]
pub struct CredentialsMissing {
    pub access_token_field: String,
    pub account_id_field: String,
}

/// Pull credentials out of `request` using the field names in `options`
///
/// # Errors
///
/// Returns [`CredentialsMissing`] if the access token or the account identifier is absent
pub fn extract_credentials(
    request: &AuthRequest,
    options: &StrategyOptions,
) -> Result<Credentials, CredentialsMissing> {
    let access_token = request.lookup(&options.access_token_field);
    let account_id = request.lookup(&options.account_id_field);

    match (access_token, account_id) {
        (Some(access_token), Some(account_id)) => Ok(Credentials {
            access_token: access_token.to_string(),
            refresh_token: request
                .lookup(&options.refresh_token_field)
                .map(ToString::to_string),
            account_id: account_id.to_string(),
        }),
        _ => Err(CredentialsMissing {
            access_token_field: options.access_token_field.clone(),
            account_id_field: options.account_id_field.clone(),
        }),
    }
}
