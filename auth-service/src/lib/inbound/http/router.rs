use std::sync::Arc;
use std::time::Duration;

use auth::AuthenticationService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::claims::get_claims;
use super::middleware::authorize;

#[derive(Clone)]
pub struct AppState {
    pub authentication_service: Arc<AuthenticationService>,
}

pub fn create_router(authentication_service: Arc<AuthenticationService>) -> Router {
    let state = AppState {
        authentication_service,
    };

    let public_routes = Router::new().route("/authenticate", post(authenticate));

    let protected_routes = Router::new()
        .route("/test", get(get_claims))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
