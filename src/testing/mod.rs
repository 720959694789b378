//! Testing utilities for the Yahoo token strategy
//!
//! ## Organization
//!
//! - [`fixtures`] - Pre-built test data (profile payloads, requests, options)
//! - [`mock`] - Stub provider client and verifier
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use yahoo_token::strategy::YahooTokenStrategy;
//! use yahoo_token::testing::{mock::{StaticVerifier, StubOAuth2Client}, TestFixtures};
//!
//! let client = Arc::new(StubOAuth2Client::body(TestFixtures::yahoo_profile_body()));
//! let strategy = YahooTokenStrategy::with_client(
//!     TestFixtures::options(),
//!     client,
//!     StaticVerifier::accepting(None),
//! )
//! .unwrap();
//! assert_eq!(strategy.name(), "yahoo-token");
//! ```

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;

/// Common test constants
pub mod constants {
    pub const TEST_ACCESS_TOKEN: &str = "access_token";
    pub const TEST_REFRESH_TOKEN: &str = "refresh_token";
    pub const TEST_ACCOUNT_ID: &str = "1234";
}
