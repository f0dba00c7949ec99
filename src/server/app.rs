use anyhow::Context;
use axum::{
    http::{header, HeaderValue},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::envelope::ApiError;
use super::routes;
use crate::db::{SqliteRepository, TriviaRepository};
use crate::settings::Settings;

pub async fn run_server(settings: &Settings, pool: SqlitePool) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.host, settings.port);
    let app = build_router(SqliteRepository::new(pool));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router<R: TriviaRepository>(repo: R) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(repo.clone()))
        .merge(questions_router(repo.clone()))
        .merge(quizzes_router(repo))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .layer(middleware::map_response(envelope_bare_errors))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("*"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Wraps the plain-text 400/404/405/422 answers axum produces on its own
/// (extractor rejections, unsupported methods) into the envelope.
async fn envelope_bare_errors(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
    if is_json {
        return response;
    }
    let Some(error) = ApiError::from_status(response.status()) else {
        return response;
    };
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = error.into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder
        .encode(&metrics, &mut buf)
        .context("Cannot encode metrics")?;
    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_owned())], buf).into_response())
}
