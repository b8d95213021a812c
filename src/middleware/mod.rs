//! Middleware layer.
//!
//! A middleware here is a [`Guard`]: a predicate over the request that either
//! lets it through or answers with an [`ApiError`]. Guards run in
//! registration order before the handler; the first refusal wins and the
//! handler never sees the request. Swapping the stub auth gate for a real
//! one means registering a different guard — no handler changes.

use std::sync::Arc;

use crate::error::ApiError;
use crate::request::Request;

pub mod auth;
pub mod logger;
pub mod validate;

/// A pre-handler check: allow the request or refuse it with an error.
pub trait Guard: Send + Sync + 'static {
    fn check(&self, req: &Request) -> Result<(), ApiError>;
}

impl<F> Guard for F
where
    F: Fn(&Request) -> Result<(), ApiError> + Send + Sync + 'static,
{
    fn check(&self, req: &Request) -> Result<(), ApiError> {
        self(req)
    }
}

/// A shareable, type-erased guard, as stored on a route.
pub type BoxedGuard = Arc<dyn Guard>;

/// Erases a concrete guard for route registration.
pub fn guard(g: impl Guard) -> BoxedGuard {
    Arc::new(g)
}
