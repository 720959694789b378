//! Yahoo profile normalization
//!
//! Maps the body of `GET /v1/user/{guid}/profile?format=json` into a [`CanonicalProfile`].
//! All defaulting happens in [`normalize_profile`]:
//!
//! | canonical field      | Yahoo source                   | default when absent |
//! |----------------------|--------------------------------|---------------------|
//! | `id`, `_json.id`     | `profile.guid`                 | error               |
//! | `name.givenName`     | `profile.givenName`            | `""`                |
//! | `name.familyName`    | `profile.familyName`           | `""`                |
//! | `displayName`        | `givenName + " " + familyName` | derived             |
//! | `emails[0].value`    | `profile.emails[0].handle`     | `""`                |
//! | `emails[0].type`     | `profile.emails[0].type`       | `""`                |
//! | `photos[0].value`    | `profile.image.imageUrl`       | `""`                |
//! | `_raw`               | response body, verbatim        |                     |
//! | `_json`              | parsed `profile` object        |                     |

use crate::oauth::InternalOAuthError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const PROVIDER_NAME: &str = "yahoo";

/// Provider-agnostic user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProfile {
    pub provider: String,
    pub id: String,
    pub display_name: String,
    pub name: ProfileName,
    pub emails: Vec<ProfileEmail>,
    pub photos: Vec<ProfilePhoto>,
    #[serde(rename = "_raw")]
    pub raw: String,
    #[serde(rename = "_json")]
    pub json: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
    pub given_name: String,
    pub family_name: String,
}

impl ProfileName {
    /// Given and family name joined by a single space
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEmail {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePhoto {
    pub value: String,
}

impl CanonicalProfile {
    /// Primary email address, empty when Yahoo returned none
    #[must_use]
    pub fn primary_email(&self) -> &str {
        self.emails.first().map_or("", |email| email.value.as_str())
    }
}

/// Errors raised while fetching or normalizing a profile. All of them are hard errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The provider could not be reached or refused the request
    #[error(transparent)]
    Transport(#[from] InternalOAuthError),

    /// The response body is not JSON
    #[error("failed to parse user profile: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body is JSON but lacks a required part of the profile structure
    #[error("user profile response is missing `{0}`")]
    MissingField(&'static str),
}

impl ProfileError {
    /// Whether this error came from the provider call rather than from the payload
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Normalize a Yahoo profile response body
///
/// # Errors
///
/// Returns [`ProfileError::Parse`] if `body` is not JSON, and
/// [`ProfileError::MissingField`] if the `profile` object or its `guid` is absent.
pub fn normalize_profile(body: &str) -> Result<CanonicalProfile, ProfileError> {
    let mut root: Map<String, Value> = match serde_json::from_str::<Value>(body)? {
        Value::Object(root) => root,
        _ => return Err(ProfileError::MissingField("profile")),
    };
    let Some(Value::Object(mut json)) = root.remove("profile") else {
        return Err(ProfileError::MissingField("profile"));
    };

    let id = json
        .get("guid")
        .and_then(Value::as_str)
        .filter(|guid| !guid.is_empty())
        .ok_or(ProfileError::MissingField("profile.guid"))?
        .to_string();
    json.insert("id".to_string(), Value::String(id.clone()));

    let name = ProfileName {
        given_name: string_or_empty(json.get("givenName")),
        family_name: string_or_empty(json.get("familyName")),
    };

    let first_email = json
        .get("emails")
        .and_then(Value::as_array)
        .and_then(|emails| emails.first());
    let email = ProfileEmail {
        value: string_or_empty(first_email.and_then(|e| e.get("handle"))),
        kind: string_or_empty(first_email.and_then(|e| e.get("type"))),
    };

    let photo = ProfilePhoto {
        value: string_or_empty(json.get("image").and_then(|image| image.get("imageUrl"))),
    };

    Ok(CanonicalProfile {
        provider: PROVIDER_NAME.to_string(),
        id,
        display_name: name.display_name(),
        name,
        emails: vec![email],
        photos: vec![photo],
        raw: body.to_string(),
        json: Value::Object(json),
    })
}

fn string_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
