use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::db::memory::InMemoryRepository;
use crate::db::{test_pool, SqliteRepository, TriviaRepository};

use super::app::build_router;

pub struct TestApp<R = InMemoryRepository> {
    pub router: Router,
    pub repo: R,
}

impl TestApp {
    pub fn new() -> Self {
        Self::serving(InMemoryRepository::with_fixtures())
    }
}

impl TestApp<SqliteRepository> {
    /// Same fixtures, but behind the real SQLite queries.
    pub async fn with_sqlite() -> Self {
        Self::serving(SqliteRepository::new(test_pool().await))
    }
}

impl<R: TriviaRepository> TestApp<R> {
    fn serving(repo: R) -> Self {
        Self {
            router: build_router(repo.clone()),
            repo,
        }
    }

    /// Returns `Value::Null` for an empty body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri).body(Body::from(body)).unwrap()
}
