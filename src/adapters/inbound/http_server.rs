//! Geo HTTP Server
//!
//! Serves country detection and validated redirects over HTTP.

use crate::application::GeoService;
use crate::domain::headers::HeaderIndex;
use crate::domain::services::geo_header_names;
use crate::domain::value_objects::{CountryCode, DetectionStage, Environment};
use crate::infrastructure::shutdown_signal;
use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Headers that keep per-visitor answers out of shared caches.
const NO_CACHE_HEADERS: [(HeaderName, &str); 4] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
];

/// Body of a successful `/api/country` response.
#[derive(Debug, Serialize)]
pub struct CountryResponse {
    pub country: CountryCode,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Diagnostic payload returned when the caller asks for it.
#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub request_id: String,
    pub stage: Option<DetectionStage>,
    pub source_header: Option<String>,
    pub geo_headers: Vec<String>,
    pub environment: Environment,
    pub processing_time_ms: f64,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: Environment,
}

/// Unexpected failure inside a handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}

impl ApiError {
    /// Render as a 500, exposing the detail only in development.
    pub fn into_response_for(self, environment: Environment) -> Response {
        tracing::error!(error = %self, "request failed");
        internal_error_response(&self.to_string(), environment)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_for(Environment::Production)
    }
}

/// HTTP server state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GeoService>,
}

impl AppState {
    pub fn new(service: Arc<GeoService>) -> Self {
        Self { service }
    }
}

/// HTTP server for country detection and redirects.
pub struct HttpServer {
    listen_addr: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(listen_addr: String, service: Arc<GeoService>) -> Self {
        Self {
            listen_addr,
            state: AppState::new(service),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Run the server until a shutdown signal arrives.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("geo redirect API listening on {}", self.listen_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the application router with tracing and panic recovery.
pub fn build_router(state: AppState) -> Router {
    let environment = state.service.environment();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/country", any(country_handler))
        .route("/api/config", get(config_handler))
        .route("/go", get(redirect_handler))
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            panic_response(panic, environment)
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Handler functions

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.service.environment(),
    })
}

async fn country_handler(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET && method != Method::POST {
        tracing::warn!(%method, "method not allowed");
        return method_not_allowed();
    }

    let debug_param = first_query_value(query.as_deref(), "debug");

    let environment = state.service.environment();
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("country", request_id = %request_id);

    span.in_scope(|| {
        country_response(&state.service, debug_param.as_deref(), &headers, request_id)
            .unwrap_or_else(|e| e.into_response_for(environment))
    })
}

fn country_response(
    service: &GeoService,
    debug_param: Option<&str>,
    headers: &HeaderMap,
    request_id: String,
) -> Result<Response, ApiError> {
    let started = Instant::now();
    let index = HeaderIndex::from_http(headers);
    let detection = service.detect(&index);
    let elapsed = started.elapsed();

    tracing::info!(
        country = %detection.country,
        stage = detection.stage.map(|s| s.as_str()).unwrap_or("none"),
        elapsed_us = elapsed.as_micros() as u64,
        "country resolved"
    );

    let debug = (service.diagnostics().debug_payload && debug_requested(debug_param, headers)).then(|| {
        DebugInfo {
            request_id,
            stage: detection.stage,
            source_header: detection.source_header.clone(),
            geo_headers: geo_header_names(&index),
            environment: service.environment(),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        }
    });

    let body = serde_json::to_value(CountryResponse {
        country: detection.country,
        timestamp: timestamp_now(),
        debug,
    })?;

    Ok((StatusCode::OK, NO_CACHE_HEADERS, Json(body)).into_response())
}

async fn config_handler(State(state): State<AppState>) -> impl IntoResponse {
    (NO_CACHE_HEADERS, Json(state.service.public_config()))
}

async fn redirect_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let service = &state.service;
    let override_url = first_query_value(query.as_deref(), "url");
    let detection = service.detect(&HeaderIndex::from_http(&headers));
    let country = detection.country;

    match service.destination_for(&country, override_url.as_deref()) {
        Some(destination) => redirect_to(&destination)
            .unwrap_or_else(|e| e.into_response_for(service.environment())),
        None => (
            StatusCode::NOT_FOUND,
            NO_CACHE_HEADERS,
            Json(serde_json::json!({
                "error": "No redirect destination available",
                "country": country,
            })),
        )
            .into_response(),
    }
}

fn redirect_to(destination: &str) -> Result<Response, ApiError> {
    let location = HeaderValue::from_str(destination)?;
    let mut response = (StatusCode::FOUND, NO_CACHE_HEADERS).into_response();
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// First value of `key` in a raw query string.
///
/// Repeated keys and undecodable pairs never fail the request; later
/// occurrences are ignored.
fn first_query_value(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

fn debug_requested(debug_param: Option<&str>, headers: &HeaderMap) -> bool {
    let from_header = headers
        .get("x-debug")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
    let from_query = debug_param.is_some_and(|v| v.eq_ignore_ascii_case("true"));
    from_header || from_query
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST")],
        NO_CACHE_HEADERS,
        Json(serde_json::json!({
            "error": "Method not allowed",
            "country": CountryCode::UNKNOWN,
        })),
    )
        .into_response()
}

fn internal_error_response(detail: &str, environment: Environment) -> Response {
    let message = if environment.is_development() {
        detail
    } else {
        GENERIC_ERROR_MESSAGE
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        NO_CACHE_HEADERS,
        Json(serde_json::json!({
            "error": "Internal server error",
            "country": CountryCode::UNKNOWN,
            "message": message,
        })),
    )
        .into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, environment: Environment) -> Response<Body> {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "handler panicked");
    internal_error_response(&detail, environment)
}

/// RFC 3339 UTC timestamp with millisecond precision.
fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
