//! OAuth2 client collaborator
//!
//! This module provides the protected-resource client the strategy uses to reach the
//! identity provider, and the errors it reports.

pub mod client;
pub mod errors;

pub use client::{OAuth2Client, ReqwestOAuth2Client};
pub use errors::{InternalOAuthError, TransportError};
