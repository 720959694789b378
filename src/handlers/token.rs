// Token authentication endpoint
use crate::profile::{CanonicalProfile, ProfileError};
use crate::strategy::{
    AuthOutcome, StrategyError, Verification, Verifier, VerifyContext, YahooTokenStrategy,
};
use crate::utils::request::auth_request_from_actix;
use crate::utils::responses::ResponseBuilder;
use actix_web::{web, HttpRequest, HttpResponse};
use async_trait::async_trait;
use log::error;
use serde::Serialize;
use serde_json::{json, Value};

/// Verifier that accepts every Yahoo profile and uses it as the user
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileVerifier;

#[async_trait]
impl Verifier for ProfileVerifier {
    type User = CanonicalProfile;

    async fn verify(
        &self,
        context: VerifyContext<'_>,
    ) -> anyhow::Result<Verification<CanonicalProfile>> {
        Ok(Verification::accept(context.profile))
    }
}

/// Authenticate the request with the Yahoo token strategy
///
/// Credentials may come from a JSON or urlencoded body, the query string, or headers.
pub async fn token_authenticate<V>(
    req: HttpRequest,
    body: web::Bytes,
    strategy: web::Data<YahooTokenStrategy<V>>,
) -> HttpResponse
where
    V: Verifier + 'static,
    V::User: Serialize,
{
    let auth_request = auth_request_from_actix(&req, &body);
    outcome_response(strategy.authenticate(&auth_request).await)
}

/// Map an authentication outcome to an HTTP response
#[must_use]
pub fn outcome_response<U: Serialize>(outcome: AuthOutcome<U>) -> HttpResponse {
    match outcome {
        AuthOutcome::Success { user, info } => {
            ResponseBuilder::ok_json(&json!({ "user": user, "info": info }))
        }
        AuthOutcome::Fail { info } => {
            let description = info
                .as_ref()
                .and_then(|info| info.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Authentication failed")
                .to_string();
            ResponseBuilder::unauthorized()
                .with_message(&description)
                .with_field("info", info.unwrap_or(Value::Null))
                .build()
        }
        AuthOutcome::Error(StrategyError::Profile(ProfileError::Transport(e))) => {
            ResponseBuilder::bad_gateway()
                .with_error_code("provider_error")
                .with_message(&e.message)
                .with_field("status_code", json!(e.status_code))
                .build()
        }
        AuthOutcome::Error(StrategyError::Profile(e)) => ResponseBuilder::bad_gateway()
            .with_error_code("invalid_provider_response")
            .with_message(&e.to_string())
            .build(),
        AuthOutcome::Error(StrategyError::Verification(e)) => {
            error!("Verifier error while authenticating: {e:#}");
            ResponseBuilder::internal_server_error().build()
        }
    }
}
