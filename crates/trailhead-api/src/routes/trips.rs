//! Trip routes: eligibility, signup controls, leader names and the feed.

use axum::{
    extract::{Extension, State},
    middleware,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trailhead_common::{
    eligibility::{self, TripIneligibilityReason},
    error::{TrailheadError, TrailheadResult},
    feed::{self, TripFeed},
    models::{Participant, SignUp, Trip},
    permissions::{GroupRequirement, Viewer, LEADERS},
    ratings,
    signup::{self, SignupState},
    validation::validate_request,
};
use validator::Validate;

use crate::middleware::{access_gate, AccessGate};
use crate::AppState;

/// Trip routes.
pub fn router(state: &AppState) -> Router<Arc<AppState>> {
    let participant_or_anon = Arc::new(AccessGate::new(
        GroupRequirement::participant_or_anon(&state.policy),
        &state.policy,
    ));
    let leaders_only = Arc::new(AccessGate::new(
        GroupRequirement::group_required([LEADERS]),
        &state.policy,
    ));

    let signups = Router::new()
        .route("/trips/eligibility", post(trip_eligibility))
        .route("/trips/signup-state", post(trip_signup_state))
        .route_layer(middleware::from_fn_with_state(participant_or_anon, access_gate));

    let leaders = Router::new()
        .route("/trips/leaders", post(trip_leaders))
        .route_layer(middleware::from_fn_with_state(leaders_only, access_gate));

    Router::new()
        .merge(signups)
        .merge(leaders)
        .route("/trips/feed", post(upcoming_feed))
}

#[derive(Debug, Deserialize, Validate)]
pub struct EligibilityRequest {
    /// The viewer's own profile; absent if they never created one
    #[validate(nested)]
    pub participant: Option<Participant>,
    #[validate(nested)]
    pub trip: Trip,
}

#[derive(Debug, Serialize)]
pub struct ReasonView {
    pub code: TripIneligibilityReason,
    /// Trusted HTML
    pub message: String,
    pub related_to_membership: bool,
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub eligible: bool,
    pub reasons: Vec<ReasonView>,
}

/// POST /api/v1/trips/eligibility
async fn trip_eligibility(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<EligibilityRequest>,
) -> TrailheadResult<Json<EligibilityResponse>> {
    validate_request(&body)?;

    let reasons = eligibility::reasons_cannot_attend_as(
        &viewer,
        body.participant.as_ref(),
        &body.trip,
        Utc::now(),
        &state.policy,
    );

    tracing::debug!(trip = %body.trip.id, reasons = ?reasons, "Eligibility resolved");

    Ok(Json(EligibilityResponse {
        eligible: reasons.is_empty(),
        reasons: reasons
            .into_iter()
            .map(|code| ReasonView {
                code,
                message: code.message(&state.policy),
                related_to_membership: code.related_to_membership(),
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupStateRequest {
    #[validate(nested)]
    pub participant: Option<Participant>,
    #[validate(nested)]
    pub trip: Trip,
    /// The participant's signup for this trip, if any
    pub existing_signup: Option<SignUp>,
}

#[derive(Debug, Serialize)]
pub struct SignupStateResponse {
    #[serde(flatten)]
    pub state: SignupState,
    pub headline: &'static str,
    pub leader_notice: Option<&'static str>,
    pub drop_hint: Option<&'static str>,
    pub shows_form: bool,
    pub reason_messages: Vec<String>,
}

/// POST /api/v1/trips/signup-state
async fn trip_signup_state(
    Extension(viewer): Extension<Viewer>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupStateRequest>,
) -> TrailheadResult<Json<SignupStateResponse>> {
    validate_request(&body)?;

    let now = Utc::now();
    let trip = &body.trip;

    let resolved = match (&viewer, body.participant.as_ref()) {
        (Viewer::User(_), Some(par)) => {
            let mismatched = body
                .existing_signup
                .as_ref()
                .is_some_and(|s| s.participant_id != par.id || s.trip_id != trip.id);
            if mismatched {
                return Err(TrailheadError::Validation {
                    message: "existing_signup belongs to another participant or trip".into(),
                });
            }
            signup::signup_state(par, trip, body.existing_signup.as_ref(), now, &state.policy)
        }
        // Anonymous viewers, or users without a profile, can only be told why not
        (viewer, participant) => SignupState::Ineligible {
            reasons: eligibility::reasons_cannot_attend_as(viewer, participant, trip, now, &state.policy),
            window: trip.signup_window(now),
        },
    };

    let reason_messages = match &resolved {
        SignupState::Ineligible { reasons, .. } => {
            reasons.iter().map(|r| r.message(&state.policy)).collect()
        }
        _ => Vec::new(),
    };

    tracing::debug!(trip = %trip.id, state = ?resolved, "Signup state resolved");

    Ok(Json(SignupStateResponse {
        headline: resolved.headline(trip.algorithm),
        leader_notice: resolved.leader_notice(),
        drop_hint: resolved.drop_hint(),
        shows_form: resolved.shows_form(),
        reason_messages,
        state: resolved,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LeadersRequest {
    #[validate(nested)]
    pub trip: Trip,
    #[validate(nested)]
    pub leaders: Vec<Participant>,
}

#[derive(Debug, Serialize)]
pub struct LeadersResponse {
    /// "Name (Rating)" as of the trip date, in request order
    pub leaders: Vec<String>,
}

/// POST /api/v1/trips/leaders
async fn trip_leaders(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LeadersRequest>,
) -> TrailheadResult<Json<LeadersResponse>> {
    validate_request(&body)?;
    Ok(Json(LeadersResponse {
        leaders: ratings::leaders_with_rating(&body.trip, &body.leaders, &state.policy),
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct FeedRequest {
    #[validate(length(max = 500, message = "At most 500 trips per feed"), nested)]
    pub trips: Vec<Trip>,
}

/// POST /api/v1/trips/feed
async fn upcoming_feed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FeedRequest>,
) -> TrailheadResult<Json<TripFeed>> {
    validate_request(&body)?;
    let today = state.policy.local_date(Utc::now());
    Ok(Json(feed::upcoming_trips(&body.trips, today, &state.club_name, &state.policy)))
}
