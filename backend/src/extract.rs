//! Validating extractors
//!
//! These run a [`Ruleset`] over the raw request input before anything is
//! deserialized or handed to a service. A failing ruleset rejects the request
//! with 422 and the complete, ordered list of field errors.

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use blog_api_shared::validation::{parse_positive_id, path_id_ruleset, Ruleset, ValidatedInput};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Check `value` against `rules`, then deserialize it
fn validate_and_parse<T: DeserializeOwned>(rules: &Ruleset, value: Value) -> Result<T, ApiError> {
    rules.validate(&value)?;
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// JSON body that passed `T::ruleset()`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ValidatedInput,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        validate_and_parse(&T::ruleset(), value).map(Self)
    }
}

/// Query string that passed `T::ruleset()`
///
/// Every query value is presented to the ruleset as a JSON string.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + ValidatedInput,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let value = Value::Object(
            params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect::<Map<String, Value>>(),
        );

        validate_and_parse(&T::ruleset(), value).map(Self)
    }
}

/// The single `:id` path parameter, validated as a positive integer
///
/// Rejects with 422 before the handler, and therefore the repository, runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let value = Value::String(raw);
        let mut input = Map::new();
        input.insert("id".to_string(), value.clone());
        path_id_ruleset().validate(&Value::Object(input))?;

        // The ruleset accepted it, so this parse succeeds
        parse_positive_id(&value)
            .map(ResourceId)
            .ok_or_else(|| ApiError::BadRequest("Invalid id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::get, Router};
    use blog_api_shared::{Check, CreatePostRequest, PostListQuery};
    use tower::ServiceExt;

    async fn echo_id(ResourceId(id): ResourceId) -> String {
        id.to_string()
    }

    async fn echo_title(ValidatedJson(post): ValidatedJson<CreatePostRequest>) -> String {
        post.title
    }

    async fn echo_author(ValidatedQuery(query): ValidatedQuery<PostListQuery>) -> String {
        format!("{:?}", query.user_id())
    }

    fn app() -> Router {
        Router::new()
            .route("/items/:id", get(echo_id))
            .route("/posts", get(echo_author).post(echo_title))
    }

    async fn send(request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/posts")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_resource_id_accepts_positive_integers() {
        assert_eq!(send(get_request("/items/17")).await, (StatusCode::OK, "17".to_string()));
    }

    #[tokio::test]
    async fn test_resource_id_rejects_non_numeric_with_422() {
        for uri in ["/items/abc", "/items/0", "/items/-1", "/items/1.5"] {
            let (status, body) = send(get_request(uri)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body.contains("id must be a positive integer"));
        }
    }

    #[tokio::test]
    async fn test_validated_json_reports_all_errors() {
        let (status, body) = send(post_json(r#"{"title": ""}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[tokio::test]
    async fn test_validated_json_passes_valid_body() {
        let (status, body) = send(post_json(r#"{"title": "Hi", "body": "There"}"#)).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "Hi"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, _) = send(post_json("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validated_query() {
        let (status, body) = send(get_request("/posts?user_id=4")).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "Some(4)"));

        let (status, _) = send(get_request("/posts?user_id=four")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(get_request("/posts")).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "None"));
    }

    #[test]
    fn test_deserialization_failure_after_validation_is_bad_request() {
        // Ruleset says nothing about types, so the typed parse is the one to fail
        let rules = Ruleset::new().field("title", [Check::Required]);
        let result =
            validate_and_parse::<CreatePostRequest>(&rules, serde_json::json!({ "title": 1 }));
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
