//! Test fixtures providing pre-built test objects

use crate::strategy::{AuthRequest, StrategyOptions};
use serde_json::{json, Value};

use super::constants::{TEST_ACCESS_TOKEN, TEST_ACCOUNT_ID, TEST_REFRESH_TOKEN};

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Strategy options with test client credentials
    #[must_use]
    pub fn options() -> StrategyOptions {
        StrategyOptions::new("123", "123")
    }

    /// A complete Yahoo profile response as returned by the social API
    #[must_use]
    pub fn yahoo_profile_json() -> Value {
        json!({
            "profile": {
                "guid": "SCQ4A46XAEDWNYKPZ6PJ4JHC4E",
                "addresses": [
                    {
                        "city": "",
                        "country": "UA",
                        "current": true,
                        "id": 1,
                        "postalCode": "",
                        "state": "",
                        "street": "",
                        "type": "HOME"
                    }
                ],
                "ageCategory": "A",
                "created": "2015-03-20T09:14:59Z",
                "emails": [
                    {
                        "handle": "andrew_orel@yahoo.com",
                        "id": 1,
                        "primary": true,
                        "type": "HOME"
                    }
                ],
                "familyName": "Orel",
                "gender": "M",
                "givenName": "Andrew",
                "image": {
                    "height": 192,
                    "imageUrl": "https://s.yimg.com/dh/ap/social/profile/profile_b192.png",
                    "size": "192x192",
                    "width": 192
                },
                "intl": "ua",
                "lang": "uk-UA",
                "memberSince": "2015-03-05T12:44:45Z",
                "nickname": "Andrew",
                "profileUrl": "http://profile.yahoo.com/SCQ4A46XAEDWNYKPZ6PJ4JHC4E",
                "timeZone": "Europe/Istanbul",
                "isConnected": true,
                "uri": "https://social.yahooapis.com/v1/user/SCQ4A46XAEDWNYKPZ6PJ4JHC4E/profile"
            }
        })
    }

    /// [`yahoo_profile_json`](Self::yahoo_profile_json) as a response body
    #[must_use]
    pub fn yahoo_profile_body() -> String {
        Self::yahoo_profile_json().to_string()
    }

    /// Profile body with only the given fields inside `profile`
    #[must_use]
    pub fn profile_body_with(profile: &Value) -> String {
        json!({ "profile": profile }).to_string()
    }

    /// Yahoo error payload as sent with a non-success status
    #[must_use]
    pub fn yahoo_error_body(description: &str) -> String {
        json!({ "error": { "lang": "en-US", "description": description } }).to_string()
    }

    /// Request carrying all three credential fields in its body
    #[must_use]
    pub fn body_request() -> AuthRequest {
        AuthRequest::new().with_body(Self::credential_fields())
    }

    /// Request carrying all three credential fields in its query string
    #[must_use]
    pub fn query_request() -> AuthRequest {
        AuthRequest::new().with_query(Self::credential_fields())
    }

    fn credential_fields() -> [(&'static str, &'static str); 3] {
        [
            ("access_token", TEST_ACCESS_TOKEN),
            ("refresh_token", TEST_REFRESH_TOKEN),
            ("xoauth_yahoo_guid", TEST_ACCOUNT_ID),
        ]
    }
}
