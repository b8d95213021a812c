//! Radix-tree request router.
//!
//! One `matchit` tree per HTTP method, O(path-length) lookup. Each route
//! carries its guard chain alongside the handler, so the dispatch path is:
//! match, run guards in order, call the handler. Static segments win over
//! `{param}` segments, which is what lets `/api/products/search` and
//! `/api/products/{id}` coexist.

use std::collections::HashMap;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::BoxedGuard;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A matched route: the guard chain plus the handler.
#[derive(Clone)]
pub(crate) struct Route {
    guards: Vec<BoxedGuard>,
    handler: BoxedHandler,
}

impl Route {
    /// Runs guards in registration order, then the handler. The first guard
    /// refusal answers immediately and the handler never runs.
    pub(crate) async fn run(&self, req: Request) -> Response {
        for guard in &self.guards {
            if let Err(refusal) = guard.check(&req) {
                return refusal.into_response();
            }
        }
        self.handler.call(req).await
    }
}

/// The application router. Build it once at startup; registrations chain.
///
/// Path parameters use `{name}` syntax and are read back in handlers with
/// [`Request::param`].
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Route>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register an unguarded handler for a method + path pair.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.on_with(method, path, Vec::new(), handler)
    }

    /// Register a handler with a guard chain, run in the given order.
    pub fn on_with(
        mut self,
        method: Method,
        path: &str,
        guards: Vec<BoxedGuard>,
        handler: impl Handler,
    ) -> Self {
        let route = Route { guards, handler: handler.into_boxed_handler() };
        self.routes
            .entry(method)
            .or_default()
            .insert(path, route)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(Route, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((matched.value.clone(), params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn named(_req: Request) -> Response {
        Response::text("named")
    }

    async fn by_id(req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    #[test]
    fn static_segments_beat_params() {
        let router = Router::new()
            .on(Method::GET, "/api/products/search", named)
            .on(Method::GET, "/api/products/{id}", by_id);

        let (_, params) = router.lookup(&Method::GET, "/api/products/search").unwrap();
        assert!(params.is_empty());

        let (_, params) = router.lookup(&Method::GET, "/api/products/42").unwrap();
        assert_eq!(params["id"], "42");
    }

    #[test]
    fn unknown_method_or_path_misses() {
        let router = Router::new().on(Method::GET, "/api/products", named);
        assert!(router.lookup(&Method::POST, "/api/products").is_none());
        assert!(router.lookup(&Method::GET, "/api/oddments").is_none());
    }
}
