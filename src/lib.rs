//! # shelf
//!
//! A small in-memory product catalog HTTP API. Accepts JSON requests,
//! validates their shape, reads or mutates an in-process product collection,
//! and answers JSON. Nothing persists past the process.
//!
//! ## Layout
//!
//! - `server` — hyper accept loop, dispatch, graceful shutdown
//! - `router` / `handler` — matchit routing with per-route guard chains
//! - [`middleware`] — guards: auth gate, body validation, access logging
//! - [`handlers`] / [`routes`] — the product operations and their wiring
//! - [`store`] / [`product`] — the owned in-memory collection and its record
//! - [`config`] / [`state`] — environment config and injected shared state
//!
//! ## The error contract
//!
//! Guards and handlers return `Result<_, ApiError>`. Every failure — bad
//! body, missing key, unknown id — flows through one `ApiError → Response`
//! mapping and answers `{"error": "..."}` with the matching status code.
//! There is no second error path.

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod product;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{ApiError, Error};
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::Server;
pub use state::AppState;
