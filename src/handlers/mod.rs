// HTTP request handlers for the token strategy
pub mod token;

use crate::utils::responses::ResponseBuilder;
use actix_web::{HttpResponse, Result};

pub use token::{outcome_response, token_authenticate, ProfileVerifier};

/// Health check endpoint
///
/// # Errors
/// Never fails; the `Result` matches actix handler conventions
pub async fn health() -> Result<HttpResponse> {
    Ok(ResponseBuilder::health("Yahoo token authentication service is running"))
}
