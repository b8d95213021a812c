//! HTTP server, request dispatch, and graceful shutdown.
//!
//! Accepts connections on a tokio `TcpListener` and serves each one on its
//! own task through hyper's auto builder (HTTP/1.1 or HTTP/2, whatever the
//! client speaks). On SIGTERM or Ctrl-C the accept loop stops immediately
//! and every in-flight connection is drained before [`Server::serve`]
//! returns, so a supervisor's grace period is spent finishing real work.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::{ApiError, Error};
use crate::middleware::logger;
use crate::request::Request;
use crate::response::IntoResponse;
use crate::router::Router;
use crate::state::AppState;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`
    /// with `state` shared across all handlers.
    ///
    /// Returns only after a full graceful shutdown.
    pub async fn serve(self, router: Router, state: AppState) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        let router = Arc::new(router);
        let state = Arc::new(state);

        info!(addr = %self.addr, "listening");

        // JoinSet tracks every connection task so shutdown can drain them.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops the accept loop even
                // when connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let state = Arc::clone(&state);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // service_fn is called once per request on the
                        // connection, not once per connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            let state = Arc::clone(&state);
                            async move { dispatch(router, state, req).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the JoinSet does not grow unbounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Infallible on purpose: every failure becomes an HTTP response here, so
/// hyper never sees an error and no request path can crash the connection.
async fn dispatch(
    router: Arc<Router>,
    state: Arc<AppState>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let (parts, incoming) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();

    let response = match router.lookup(&method, &path) {
        Some((route, params)) => match incoming.collect().await {
            Ok(collected) => {
                let request = build_request(parts, params, collected.to_bytes(), state);
                route.run(request).await
            }
            Err(e) => {
                ApiError::validation(format!("failed to read request body: {e}")).into_response()
            }
        },
        None => ApiError::not_found("Resource not found").into_response(),
    };

    logger::record(&method, &path, response.status_code(), started.elapsed());

    Ok(response.into_inner())
}

fn build_request(
    parts: http::request::Parts,
    params: HashMap<String, String>,
    body: Bytes,
    state: Arc<AppState>,
) -> Request {
    Request::new(
        parts.method,
        parts.uri.path().to_owned(),
        parts.uri.query(),
        parts.headers,
        params,
        body,
        state,
    )
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal: SIGTERM or Ctrl-C on Unix,
/// Ctrl-C only elsewhere.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
