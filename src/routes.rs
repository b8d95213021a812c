//! The route table.
//!
//! Guard order on mutating routes is auth first, then body validation, so an
//! unauthenticated caller learns nothing about what a valid body looks like.

use http::Method;

use crate::handlers;
use crate::middleware::{auth, validate};
use crate::router::Router;

pub fn router() -> Router {
    Router::new()
        .on(Method::GET, "/", handlers::root)
        .on(Method::GET, "/api/products", handlers::list_products)
        .on(Method::GET, "/api/products/search", handlers::search_products)
        .on(Method::GET, "/api/products/stats", handlers::product_stats)
        .on(Method::GET, "/api/products/{id}", handlers::get_product)
        .on_with(
            Method::POST,
            "/api/products",
            vec![auth::gate(), validate::new_product()],
            handlers::create_product,
        )
        .on_with(
            Method::PUT,
            "/api/products/{id}",
            vec![auth::gate(), validate::product_patch()],
            handlers::update_product,
        )
        .on_with(
            Method::DELETE,
            "/api/products/{id}",
            vec![auth::gate()],
            handlers::delete_product,
        )
}
