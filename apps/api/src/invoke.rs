//! Function-per-request adapter.
//!
//! Translates one serverless HTTP event (API Gateway / Netlify Functions shape)
//! into a request against the same axum router the standalone server uses, and
//! the router's response back into a response event.

use std::collections::HashMap;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{HeaderName, HeaderValue, Method, Request},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tracing::debug;

/// Responses above this size are not buffered.
const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Dispatches `event` through `router`, stripping `path_prefix` from the event path first.
pub async fn handle_event(
    router: Router,
    event: InvocationEvent,
    path_prefix: &str,
) -> Result<InvocationResponse> {
    let request = to_request(event, path_prefix)?;
    debug!("Invocation {} {}", request.method(), request.uri());

    let response = router
        .oneshot(request)
        .await
        .context("router failed to produce a response")?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let bytes = to_bytes(response.into_body(), MAX_RESPONSE_BYTES)
        .await
        .context("failed to read response body")?;

    let (body, is_base64_encoded) = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => (text, false),
        Err(_) => (STANDARD.encode(&bytes), true),
    };

    Ok(InvocationResponse {
        status_code: status,
        headers,
        body,
        is_base64_encoded,
    })
}

fn to_request(event: InvocationEvent, path_prefix: &str) -> Result<Request<Body>> {
    let method = Method::from_bytes(event.http_method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method '{}'", event.http_method))?;

    // No route reads the query string, so event query parameters are not forwarded.
    let uri = route_path(&event.path, path_prefix);

    let body = match event.body {
        None => Bytes::new(),
        Some(b) if event.is_base64_encoded => Bytes::from(
            STANDARD
                .decode(b.as_bytes())
                .context("event body is not valid base64")?,
        ),
        Some(b) => Bytes::from(b),
    };

    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .with_context(|| format!("invalid request URI '{uri}'"))?;

    for (name, value) in event.headers {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) else {
            debug!("Dropping unrepresentable header {name}");
            continue;
        };
        request.headers_mut().insert(name, value);
    }

    Ok(request)
}

/// `/.netlify/functions/api/api/companies` → `/api/companies`.
fn route_path<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() && rest.is_empty() => "/",
        Some(rest) if !prefix.is_empty() && rest.starts_with('/') => rest,
        _ => path,
    }
}
