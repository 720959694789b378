//! HTTP response helpers
//!
//! Error bodies share one shape: `{"error": <code>, "error_description": <text>}`,
//! optionally extended with extra fields.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::{json, Map, Value};

/// Builder for JSON error responses
#[derive(Debug)]
pub struct ErrorResponseBuilder {
    status: StatusCode,
    error_code: String,
    description: String,
    extra: Map<String, Value>,
}

impl ErrorResponseBuilder {
    fn new(status: StatusCode, error_code: &str, description: &str) -> Self {
        Self {
            status,
            error_code: error_code.to_string(),
            description: description.to_string(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_error_code(mut self, error_code: &str) -> Self {
        self.error_code = error_code.to_string();
        self
    }

    #[must_use]
    pub fn with_message(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Add a field next to `error` and `error_description`
    #[must_use]
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    #[must_use]
    pub fn build(self) -> HttpResponse {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.error_code));
        body.insert(
            "error_description".to_string(),
            Value::String(self.description),
        );
        body.extend(self.extra);
        HttpResponse::build(self.status).json(Value::Object(body))
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// 401 error response
    #[must_use]
    pub fn unauthorized() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Authentication is required to access this resource",
        )
    }

    /// 500 error response
    #[must_use]
    pub fn internal_server_error() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "server_error",
            "An internal server error occurred",
        )
    }

    /// 502 error response
    #[must_use]
    pub fn bad_gateway() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(
            StatusCode::BAD_GATEWAY,
            "bad_gateway",
            "Failed to connect to upstream server",
        )
    }

    /// 200 response with a JSON body
    #[must_use]
    pub fn ok_json(body: &Value) -> HttpResponse {
        HttpResponse::Ok().json(body)
    }

    /// 200 health response
    #[must_use]
    pub fn health(message: &str) -> HttpResponse {
        Self::ok_json(&json!({ "status": "ok", "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_error_builder_shape() {
        let response = ResponseBuilder::bad_gateway()
            .with_error_code("provider_error")
            .with_message("Invalid token")
            .with_field("status_code", json!(401))
            .build();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "provider_error",
                "error_description": "Invalid token",
                "status_code": 401
            })
        );
    }

    #[actix_web::test]
    async fn test_default_unauthorized() {
        let response = ResponseBuilder::unauthorized().build();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "unauthorized");
    }
}
