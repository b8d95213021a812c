//! Stub authentication gate.
//!
//! Mutating routes (POST, PUT, DELETE) run this guard first. When an
//! `API_KEY` is configured, the request must carry the same value in its
//! `x-api-key` header; when no key is configured the gate is open. Real
//! authentication replaces this guard at registration time, nothing else.

use crate::error::ApiError;
use crate::middleware::{BoxedGuard, guard};

pub const API_KEY_HEADER: &str = "x-api-key";

/// The API-key gate, ready to hang on a route.
pub fn gate() -> BoxedGuard {
    guard(|req: &crate::Request| {
        let Some(expected) = req.state().config.api_key.as_deref() else {
            return Ok(());
        };
        match req.header(API_KEY_HEADER) {
            Some(presented) if presented == expected => Ok(()),
            Some(_) => Err(ApiError::Unauthorized("invalid API key".into())),
            None => Err(ApiError::Unauthorized(format!(
                "missing {API_KEY_HEADER} header"
            ))),
        }
    })
}
