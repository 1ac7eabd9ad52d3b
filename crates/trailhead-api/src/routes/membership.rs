//! Membership routes: dues and waiver status from the cached record.

use axum::{extract::State, middleware, routing::post, Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trailhead_common::{error::TrailheadResult, membership, models::Membership, permissions::GroupRequirement};

use crate::middleware::{access_gate, AccessGate};
use crate::AppState;

/// Membership routes.
pub fn router(state: &AppState) -> Router<Arc<AppState>> {
    let gate = Arc::new(AccessGate::new(
        GroupRequirement::participant_or_anon(&state.policy),
        &state.policy,
    ));
    Router::new()
        .route("/membership/status", post(membership_status))
        .route_layer(middleware::from_fn_with_state(gate, access_gate))
}

#[derive(Debug, Deserialize)]
pub struct MembershipStatusRequest {
    pub membership: Option<Membership>,
    /// Date to check; defaults to today in club-local time
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct MembershipStatusResponse {
    pub on: NaiveDate,
    pub membership_active: bool,
    pub waiver_active: bool,
    /// The cache should be refreshed before trusting a negative answer
    pub cache_stale: bool,
}

/// POST /api/v1/membership/status
async fn membership_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MembershipStatusRequest>,
) -> TrailheadResult<Json<MembershipStatusResponse>> {
    let now = Utc::now();
    let on = body.on.unwrap_or_else(|| state.policy.local_date(now));
    let record = body.membership.as_ref();

    Ok(Json(MembershipStatusResponse {
        on,
        membership_active: membership::membership_active(record, on),
        waiver_active: membership::waiver_active_until(record, on),
        cache_stale: membership::cache_is_stale(record, now),
    }))
}
