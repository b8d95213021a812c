//! Product body validation.
//!
//! Shape checks run as a guard before create and update handlers, so a
//! malformed body is refused with a field-specific 400 before any store
//! access. Create requires every field; update accepts any subset but
//! type-checks whatever is present.

use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{BoxedGuard, guard};
use crate::request::Request;

/// Guard for `POST /api/products`: all fields required.
pub fn new_product() -> BoxedGuard {
    guard(|req: &Request| check(req, Rules::Required))
}

/// Guard for `PUT /api/products/{id}`: fields optional, typed when present.
pub fn product_patch() -> BoxedGuard {
    guard(|req: &Request| check(req, Rules::Optional))
}

#[derive(Clone, Copy, PartialEq)]
enum Rules {
    Required,
    Optional,
}

fn check(req: &Request, rules: Rules) -> Result<(), ApiError> {
    let body: Value = serde_json::from_slice(req.body())
        .map_err(|_| ApiError::validation("request body must be a JSON object"))?;
    let Some(object) = body.as_object() else {
        return Err(ApiError::validation("request body must be a JSON object"));
    };

    check_string(object.get("name"), "name", rules)?;
    check_string(object.get("description"), "description", rules)?;
    check_number(object.get("price"), rules)?;
    check_string(object.get("category"), "category", rules)?;

    // inStock is optional in both modes, but must be a boolean when given.
    match object.get("inStock") {
        None | Some(Value::Bool(_)) => Ok(()),
        Some(_) => Err(ApiError::validation("inStock must be a boolean if provided")),
    }
}

fn check_string(value: Option<&Value>, field: &str, rules: Rules) -> Result<(), ApiError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        None if rules == Rules::Optional => Ok(()),
        _ => Err(ApiError::validation(format!(
            "Product {field} is required and must be a non-empty string"
        ))),
    }
}

fn check_number(value: Option<&Value>, rules: Rules) -> Result<(), ApiError> {
    match value {
        Some(Value::Number(_)) => Ok(()),
        None if rules == Rules::Optional => Ok(()),
        _ => Err(ApiError::validation(
            "Product price is required and must be a number",
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::Method;

    use super::*;
    use crate::config::Config;
    use crate::middleware::Guard;
    use crate::request::TestRequest;
    use crate::state::AppState;

    fn req(body: &str) -> Request {
        TestRequest::new(Method::POST, "/api/products")
            .body(body)
            .build(Arc::new(AppState::new(Config::default())))
    }

    const VALID: &str =
        r#"{"name":"Kettle","description":"Electric kettle","price":25,"category":"kitchen"}"#;

    #[test]
    fn valid_create_body_passes() {
        assert!(new_product().check(&req(VALID)).is_ok());
    }

    #[test]
    fn missing_name_names_the_field() {
        let body = r#"{"description":"x","price":1,"category":"misc"}"#;
        let err = new_product().check(&req(body)).unwrap_err();
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn wrong_types_are_refused() {
        let bad_price = r#"{"name":"x","description":"y","price":"cheap","category":"misc"}"#;
        assert!(new_product().check(&req(bad_price)).is_err());

        let bad_stock =
            r#"{"name":"x","description":"y","price":1,"category":"misc","inStock":"yes"}"#;
        let err = new_product().check(&req(bad_stock)).unwrap_err();
        assert!(err.to_string().contains("inStock"));
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let body = r#"{"name":"","description":"y","price":1,"category":"misc"}"#;
        assert!(new_product().check(&req(body)).is_err());
    }

    #[test]
    fn non_object_bodies_are_refused() {
        assert!(new_product().check(&req("[]")).is_err());
        assert!(new_product().check(&req("not json")).is_err());
    }

    #[test]
    fn patch_accepts_partial_bodies() {
        assert!(product_patch().check(&req(r#"{"price":999}"#)).is_ok());
        assert!(product_patch().check(&req(r#"{}"#)).is_ok());
    }

    #[test]
    fn patch_still_type_checks_present_fields() {
        assert!(product_patch().check(&req(r#"{"price":"cheap"}"#)).is_err());
        assert!(product_patch().check(&req(r#"{"name":""}"#)).is_err());
        assert!(product_patch().check(&req(r#"{"inStock":1}"#)).is_err());
    }
}
