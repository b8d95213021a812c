//! Route handlers, one per operation.
//!
//! Handlers stay thin: query parsing and store calls. Body shape was already
//! checked by the validation guard, so the typed parse here only fails for
//! bodies the guard never saw (unguarded callers in tests). Anything that
//! can fail returns `Result<_, ApiError>` and flows through the single
//! error-to-response mapping.

use http::StatusCode;
use serde_json::json;

use crate::error::ApiError;
use crate::product::{NewProduct, ProductPatch};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// GET /
pub async fn root(_req: Request) -> Response {
    Response::text(
        "Hello World! Welcome to the Product API! Go to /api/products to see all products.",
    )
}

/// GET /api/products?category=&page=&limit=
///
/// `page` and `limit` that fail to parse as positive integers fall back to
/// the defaults; pagination is simple slicing, nothing more.
pub async fn list_products(req: Request) -> Response {
    let page = positive_or(req.query("page"), DEFAULT_PAGE);
    let limit = positive_or(req.query("limit"), DEFAULT_LIMIT);

    let listing = req.state().store.page(req.query("category"), page, limit);
    Json(listing).into_response()
}

/// GET /api/products/search?name=
pub async fn search_products(req: Request) -> Result<Response, ApiError> {
    let name = req
        .query("name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation(r#"Search query "name" is required"#))?;

    let products = req.state().store.search(name);
    Ok(Json(json!({ "total": products.len(), "products": products })).into_response())
}

/// GET /api/products/stats
pub async fn product_stats(req: Request) -> Response {
    Json(json!({ "stats": req.state().store.stats() })).into_response()
}

/// GET /api/products/{id}
pub async fn get_product(req: Request) -> Result<Response, ApiError> {
    let id = req.param("id").unwrap_or_default();
    let product = req
        .state()
        .store
        .get(id)
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    Ok(Json(product).into_response())
}

/// POST /api/products
pub async fn create_product(req: Request) -> Result<Response, ApiError> {
    let new: NewProduct = req.json()?;
    let product = req.state().store.insert(new);

    let body = serde_json::to_vec(&product)
        .map_err(|e| ApiError::Internal(format!("response serialization: {e}")))?;
    Ok(Response::builder().status(StatusCode::CREATED).json(body))
}

/// PUT /api/products/{id}
pub async fn update_product(req: Request) -> Result<Response, ApiError> {
    let patch: ProductPatch = req.json()?;
    let id = req.param("id").unwrap_or_default();

    let updated = req
        .state()
        .store
        .update(id, patch)
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    Ok(Json(updated).into_response())
}

/// DELETE /api/products/{id}
pub async fn delete_product(req: Request) -> Result<Response, ApiError> {
    let id = req.param("id").unwrap_or_default();
    if !req.state().store.remove(id) {
        return Err(ApiError::not_found("Product not found"));
    }
    Ok(Response::status(StatusCode::NO_CONTENT))
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.parse().ok()).filter(|&n| n >= 1).unwrap_or(default)
}
