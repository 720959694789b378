//! Mock objects and fake implementations for testing
//!
//! This module provides stand-ins for the provider client and the application
//! verifier so the strategy can be exercised without network access.

use crate::oauth::{OAuth2Client, TransportError};
use crate::profile::CanonicalProfile;
use crate::strategy::{AuthRequest, Verification, Verifier, VerifyContext};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// A request seen by [`StubOAuth2Client`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub access_token: String,
}

/// Canned reply of [`StubOAuth2Client`]
#[derive(Debug, Clone)]
pub enum StubResponse {
    Body(String),
    Status { status_code: u16, data: String },
    Failure(String),
}

/// [`OAuth2Client`] returning the same canned reply to every request
#[derive(Debug)]
pub struct StubOAuth2Client {
    response: StubResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubOAuth2Client {
    #[must_use]
    pub fn new(response: StubResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `body` and a success status
    #[must_use]
    pub fn body(body: impl Into<String>) -> Self {
        Self::new(StubResponse::Body(body.into()))
    }

    /// Reply with a non-success status and `data` as the error body
    #[must_use]
    pub fn status(status_code: u16, data: impl Into<String>) -> Self {
        Self::new(StubResponse::Status {
            status_code,
            data: data.into(),
        })
    }

    /// Fail without any response, like a connection error
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(StubResponse::Failure(message.into()))
    }

    /// Requests received so far
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OAuth2Client for StubOAuth2Client {
    async fn get(&self, url: &str, access_token: &str) -> Result<String, TransportError> {
        self.requests
            .lock()
            .map_err(|e| TransportError::Other(e.to_string()))?
            .push(RecordedRequest {
                url: url.to_string(),
                access_token: access_token.to_string(),
            });

        match &self.response {
            StubResponse::Body(body) => Ok(body.clone()),
            StubResponse::Status { status_code, data } => Err(TransportError::Status {
                status_code: *status_code,
                data: data.clone(),
            }),
            StubResponse::Failure(message) => Err(TransportError::Other(message.clone())),
        }
    }
}

/// Decision a [`StaticVerifier`] always returns
#[derive(Debug, Clone)]
pub enum StaticDecision {
    /// Accept with the profile as the user
    Accept { info: Option<Value> },
    Reject { info: Option<Value> },
    Error(String),
}

/// Arguments a [`StaticVerifier`] was called with
#[derive(Debug, Clone)]
pub struct VerifyCall {
    pub request: Option<AuthRequest>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub profile: CanonicalProfile,
}

/// [`Verifier`] with a fixed decision that records its calls
#[derive(Debug)]
pub struct StaticVerifier {
    decision: StaticDecision,
    calls: Mutex<Vec<VerifyCall>>,
}

impl StaticVerifier {
    #[must_use]
    pub fn new(decision: StaticDecision) -> Self {
        Self {
            decision,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn accepting(info: Option<Value>) -> Self {
        Self::new(StaticDecision::Accept { info })
    }

    #[must_use]
    pub fn rejecting(info: Option<Value>) -> Self {
        Self::new(StaticDecision::Reject { info })
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(StaticDecision::Error(message.into()))
    }

    /// Calls received so far
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<VerifyCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Verifier for StaticVerifier {
    type User = CanonicalProfile;

    async fn verify(
        &self,
        context: VerifyContext<'_>,
    ) -> anyhow::Result<Verification<CanonicalProfile>> {
        self.calls
            .lock()
            .map_err(|e| anyhow::anyhow!("verifier lock poisoned: {e}"))?
            .push(VerifyCall {
                request: context.request.cloned(),
                access_token: context.access_token.to_string(),
                refresh_token: context.refresh_token.map(ToString::to_string),
                profile: context.profile.clone(),
            });

        match &self.decision {
            StaticDecision::Accept { info } => Ok(Verification::Accepted {
                user: context.profile,
                info: info.clone(),
            }),
            StaticDecision::Reject { info } => Ok(info
                .clone()
                .map_or_else(Verification::reject, Verification::reject_with_info)),
            StaticDecision::Error(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}
