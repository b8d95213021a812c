//! Access logging.
//!
//! One structured line per dispatched request, emitted after the response is
//! decided so it can carry the status and latency. Subscriber setup lives in
//! the binary; here we only emit.

use std::time::Duration;

use http::{Method, StatusCode};
use tracing::info;

pub fn record(method: &Method, path: &str, status: StatusCode, elapsed: Duration) {
    info!(
        %method,
        path,
        status = status.as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request"
    );
}
