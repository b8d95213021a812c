//! Process bootstrap: logging, config, state, routes, serve.
//!
//! Run with:
//!   RUST_LOG=info PORT=3000 cargo run
//!
//! Try:
//!   curl http://localhost:3000/api/products
//!   curl http://localhost:3000/api/products/search?name=lap
//!   curl -X POST http://localhost:3000/api/products \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"Kettle","description":"Electric kettle","price":25,"category":"kitchen"}'

use shelf::config::Config;
use shelf::{AppState, Server, routes};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!(
        port = config.port,
        auth = if config.api_key.is_some() { "api-key" } else { "open" },
        "configuration loaded"
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(config);

    Server::bind(&addr)
        .serve(routes::router(), state)
        .await
        .expect("server error");
}
