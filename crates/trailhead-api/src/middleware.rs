//! Middleware: viewer extraction, group gates, security headers.

use axum::{
    extract::{OriginalUri, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use trailhead_common::{
    auth,
    error::TrailheadError,
    permissions::{check_access, AccessDecision, GroupRequirement, Viewer},
    policy::ClubPolicy,
};

use crate::AppState;

/// Resolve the viewer from the `Authorization: Bearer <token>` header.
///
/// No header means an anonymous viewer; a header that doesn't check out is
/// rejected rather than downgraded to anonymous.
pub async fn viewer_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, TrailheadError> {
    let viewer = match request.headers().get(header::AUTHORIZATION) {
        None => Viewer::Anonymous,
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or(TrailheadError::Unauthorized)?;

            let claims = auth::validate_token(token, &state.jwt_secret)?;

            // Ensure it's an access token, not a refresh token
            if claims.token_type != "access" {
                return Err(TrailheadError::InvalidToken);
            }
            Viewer::from_claims(&claims)?
        }
    };

    // Insert viewer into request extensions for handlers to use
    request.extensions_mut().insert(viewer);

    Ok(next.run(request).await)
}

/// A group requirement bound to the policy that supplies its redirect URLs.
#[derive(Clone)]
pub struct AccessGate {
    pub requirement: GroupRequirement,
    pub policy: ClubPolicy,
}

impl AccessGate {
    pub fn new(requirement: GroupRequirement, policy: &ClubPolicy) -> Self {
        Self {
            requirement,
            policy: policy.clone(),
        }
    }
}

/// Let the request through only if the viewer satisfies the gate.
///
/// Must run inside [`viewer_middleware`].
pub async fn access_gate(State(gate): State<Arc<AccessGate>>, request: Request, next: Next) -> Response {
    let viewer = request
        .extensions()
        .get::<Viewer>()
        .cloned()
        .unwrap_or(Viewer::Anonymous);
    // Nested routers see a stripped URI; redirect back to the full one
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| request.uri().clone());
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    match check_access(&viewer, &gate.requirement, path, &gate.policy) {
        AccessDecision::Allow => next.run(request).await,
        AccessDecision::Redirect { location } => {
            tracing::debug!(path, location = %location, "Access gate redirect");
            Redirect::to(&location).into_response()
        }
        AccessDecision::Forbidden => {
            tracing::debug!(path, groups = ?gate.requirement.groups, "Access gate denied");
            TrailheadError::MissingGroup {
                groups: gate.requirement.groups.join(", "),
            }
            .into_response()
        }
    }
}

// ── Security headers ──────────────────────────────────────────────────────────

/// Add security headers to every HTTP response.
///
/// Headers applied:
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Content-Security-Policy`: API responses load nothing
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let h = response.headers_mut();

    macro_rules! set {
        ($name:expr, $val:expr) => {
            if let Ok(v) = $val.parse::<axum::http::HeaderValue>() {
                h.insert($name, v);
            }
        };
    }

    set!(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
    set!(header::X_FRAME_OPTIONS, "DENY");
    set!(header::REFERRER_POLICY, "strict-origin-when-cross-origin");
    set!(
        header::CONTENT_SECURITY_POLICY,
        "default-src 'none'; frame-ancestors 'none'"
    );

    response
}
