//! # trailhead-api
//!
//! REST API layer for Trailhead. Callers post the snapshots they hold
//! (participant, trip, signup) and get back profile problems, eligibility
//! reasons and the signup state to render.

pub mod middleware;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use trailhead_common::policy::ClubPolicy;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Club rules every time-dependent check runs under.
    pub policy: ClubPolicy,
    /// HS256 secret shared with the login service.
    pub jwt_secret: String,
    /// Used for feed titles.
    pub club_name: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(policy: ClubPolicy, jwt_secret: impl Into<String>, club_name: impl Into<String>) -> Self {
        Self {
            policy,
            jwt_secret: jwt_secret.into(),
            club_name: club_name.into(),
            started_at: Instant::now(),
        }
    }
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .merge(routes::health::router())
        .merge(routes::profile::router())
        .merge(routes::trips::router(&state))
        .merge(routes::membership::router(&state))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::viewer_middleware,
        ));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::compression::CompressionLayer::new())
        .with_state(state)
}
