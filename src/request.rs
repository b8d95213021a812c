//! Incoming HTTP request type.
//!
//! The server collects the body and flattens what handlers actually need:
//! method, path, headers, decoded query pairs, route params, body bytes, and
//! a handle to the shared [`AppState`].

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// An incoming request, ready for a guard chain and a handler.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
    params: HashMap<String, String>,
    body: Bytes,
    state: Arc<AppState>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        raw_query: Option<&str>,
        headers: HeaderMap,
        params: HashMap<String, String>,
        body: Bytes,
        state: Arc<AppState>,
    ) -> Self {
        Self {
            method,
            path,
            headers,
            query: raw_query.map(parse_query).unwrap_or_default(),
            params,
            body,
            state,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// A named path parameter. For the route `/api/products/{id}`,
    /// `req.param("id")` on `/api/products/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// A decoded query-string value. `?name=coffee+maker` yields
    /// `query("name") == Some("coffee maker")`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Parses the body as JSON into `T`. Malformed bodies answer 400.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::validation(format!("invalid JSON body: {e}")))
    }
}

// ── Query-string parsing ──────────────────────────────────────────────────────

/// Splits `a=1&b=two` into pairs, percent-decoding keys and values.
/// Later duplicates win. Keys without `=` map to the empty string.
fn parse_query(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Percent-decoding plus `+` as space. Invalid escapes pass through verbatim.
fn decode_component(raw: &str) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: Option<&u8>) -> Option<u8> {
    match *b? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// ── Test construction ─────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) struct TestRequest {
    method: Method,
    target: String,
    headers: HeaderMap,
    params: HashMap<String, String>,
    body: Vec<u8>,
}

#[cfg(test)]
impl TestRequest {
    pub(crate) fn new(method: Method, target: &str) -> Self {
        Self {
            method,
            target: target.to_owned(),
            headers: HeaderMap::new(),
            params: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub(crate) fn param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_owned(), value.to_owned());
        self
    }

    pub(crate) fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.insert(
            http::header::HeaderName::from_static(name),
            value.parse().expect("test header value"),
        );
        self
    }

    pub(crate) fn body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    pub(crate) fn build(self, state: Arc<AppState>) -> Request {
        let (path, query) = self
            .target
            .split_once('?')
            .map_or((self.target.as_str(), None), |(p, q)| (p, Some(q)));
        Request::new(
            self.method,
            path.to_owned(),
            query,
            self.headers,
            self.params,
            Bytes::from(self.body),
            state,
        )
    }
}
