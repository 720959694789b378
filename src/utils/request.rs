// Conversion from actix-web requests to the framework-neutral AuthRequest
use crate::strategy::AuthRequest;
use actix_web::{HttpMessage, HttpRequest};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

/// Build an [`AuthRequest`] from an actix request and its raw body.
///
/// JSON and urlencoded bodies are understood; any other body is ignored. Repeated
/// query or form keys keep their first value.
#[must_use]
pub fn auth_request_from_actix(req: &HttpRequest, body: &[u8]) -> AuthRequest {
    AuthRequest {
        body: parse_body(req.content_type(), body),
        query: Some(parse_urlencoded(req.query_string().as_bytes())),
        headers: Some(
            req.headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
                })
                .collect(),
        ),
    }
}

fn parse_body(content_type: &str, body: &[u8]) -> Option<HashMap<String, String>> {
    if body.is_empty() {
        return None;
    }

    if content_type.eq_ignore_ascii_case("application/json") {
        parse_json_object(body)
    } else if content_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        Some(parse_urlencoded(body))
    } else {
        debug!("Ignoring request body with content type {content_type:?}");
        None
    }
}

fn parse_json_object(body: &[u8]) -> Option<HashMap<String, String>> {
    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
        debug!("Request body is not a JSON object, ignoring it");
        return None;
    };

    Some(
        fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                _ => None,
            })
            .collect(),
    )
}

fn parse_urlencoded(input: &[u8]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(input) {
        fields
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    fields
}
