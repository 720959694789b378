//! Verification step and terminal outcomes of an authentication attempt

use super::credentials::AuthRequest;
use crate::profile::{CanonicalProfile, ProfileError};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Decision returned by the application's verifier
#[derive(Debug, Clone, PartialEq)]
pub enum Verification<U> {
    Accepted { user: U, info: Option<Value> },
    Rejected { info: Option<Value> },
}

impl<U> Verification<U> {
    #[must_use]
    pub const fn accept(user: U) -> Self {
        Self::Accepted { user, info: None }
    }

    #[must_use]
    pub const fn accept_with_info(user: U, info: Value) -> Self {
        Self::Accepted {
            user,
            info: Some(info),
        }
    }

    #[must_use]
    pub const fn reject() -> Self {
        Self::Rejected { info: None }
    }

    #[must_use]
    pub const fn reject_with_info(info: Value) -> Self {
        Self::Rejected { info: Some(info) }
    }
}

/// Everything the verifier gets to see
#[derive(Debug)]
pub struct VerifyContext<'a> {
    /// Only set when `pass_request_to_callback` is enabled
    pub request: Option<&'a AuthRequest>,
    pub access_token: &'a str,
    pub refresh_token: Option<&'a str>,
    pub profile: CanonicalProfile,
}

/// Application hook deciding whether a Yahoo profile maps to a user
#[async_trait]
pub trait Verifier: Send + Sync {
    type User: Send;

    /// Decide whether the profile in `context` is an authenticated user
    ///
    /// # Errors
    ///
    /// Returning an error aborts the attempt with [`AuthOutcome::Error`]; use
    /// [`Verification::Rejected`] for "not authenticated".
    async fn verify(&self, context: VerifyContext<'_>) -> anyhow::Result<Verification<Self::User>>;
}

/// Hard failure of the authentication pipeline
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Profile fetch or normalization failed
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The verifier returned an error
    #[error(transparent)]
    Verification(anyhow::Error),
}

/// Terminal state of one authentication attempt
#[derive(Debug)]
pub enum AuthOutcome<U> {
    Success { user: U, info: Option<Value> },
    Fail { info: Option<Value> },
    Error(StrategyError),
}

impl<U> AuthOutcome<U> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// `info.message` of a failed attempt, if present
    #[must_use]
    pub fn fail_message(&self) -> Option<&str> {
        match self {
            Self::Fail { info: Some(info) } => info.get("message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Hand the outcome to the host framework
    pub fn dispatch<H>(self, host: &mut H)
    where
        H: AuthenticationHost<U> + ?Sized,
    {
        match self {
            Self::Success { user, info } => host.success(user, info),
            Self::Fail { info } => host.fail(info),
            Self::Error(error) => host.error(error),
        }
    }
}

/// Outcome signals expected by a pluggable-strategy authentication framework
pub trait AuthenticationHost<U> {
    fn success(&mut self, user: U, info: Option<Value>);
    fn fail(&mut self, info: Option<Value>);
    fn error(&mut self, error: StrategyError);
}
