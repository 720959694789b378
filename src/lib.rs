#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the yahoo-token application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod handlers;
pub mod oauth;
pub mod profile;
pub mod settings;
pub mod strategy;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use handlers::{health, token_authenticate, ProfileVerifier};
pub use oauth::{InternalOAuthError, OAuth2Client, ReqwestOAuth2Client, TransportError};
pub use profile::{normalize_profile, CanonicalProfile, ProfileError};
pub use settings::YahooTokenSettings;
pub use strategy::{
    AuthOutcome, AuthRequest, AuthenticationHost, StrategyError, StrategyOptions, Verification,
    Verifier, VerifyContext, YahooTokenStrategy,
};
