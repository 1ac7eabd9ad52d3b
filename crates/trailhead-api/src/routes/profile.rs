//! Profile routes: what a participant must fix before signing up for trips.

use axum::{
    extract::{Extension, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trailhead_common::{
    error::{TrailheadError, TrailheadResult},
    models::{Participant, ProfileStatus},
    permissions::Viewer,
    profile::{self, ProfileIssue},
    validation::validate_request,
};
use validator::Validate;

use crate::AppState;

/// Profile routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile/problems", post(profile_problems))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileProblemsRequest {
    #[validate(nested)]
    pub participant: Participant,
}

#[derive(Debug, Serialize)]
pub struct ProfileProblemsResponse {
    pub problems: Vec<ProfileIssue>,
    /// Confirmed recently enough, regardless of problems
    pub info_current: bool,
    pub status: ProfileStatus,
}

/// POST /api/v1/profile/problems: any signed-in user may check a profile,
/// complete or not, since fixing it is how they get `users_with_info`.
async fn profile_problems(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProfileProblemsRequest>,
) -> TrailheadResult<Json<ProfileProblemsResponse>> {
    if !viewer.is_authenticated() {
        return Err(TrailheadError::Unauthorized);
    }
    validate_request(&body)?;

    let now = Utc::now();
    let par = &body.participant;
    let problems = profile::problems_with_profile(par, &state.policy);

    tracing::debug!(
        participant = %par.id,
        problems = problems.len(),
        "Profile checked"
    );

    Ok(Json(ProfileProblemsResponse {
        problems,
        info_current: profile::info_current(par, now, &state.policy),
        status: profile::profile_status(Some(par), now, &state.policy),
    }))
}
