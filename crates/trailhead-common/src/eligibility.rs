//! Reasons a participant may not attend a trip.
//!
//! Every check runs independently and all failures are reported, so new
//! reasons only need a variant and a check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::membership;
use crate::models::{Participant, Trip};
use crate::permissions::Viewer;
use crate::policy::ClubPolicy;
use crate::profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripIneligibilityReason {
    NotLoggedIn,
    NoProfileInfo,
    ProfileProblem,
    IsTripWimp,
    AlreadyALeader,
    MembershipNeedsRenewal,
    WaiverNeedsRenewal,
}

impl TripIneligibilityReason {
    /// Refreshing the cached membership might make this reason go away.
    pub fn related_to_membership(self) -> bool {
        matches!(self, Self::MembershipNeedsRenewal | Self::WaiverNeedsRenewal)
    }

    /// Explanation shown in place of the signup form. Safe to render as HTML.
    pub fn message(self, policy: &ClubPolicy) -> String {
        match self {
            Self::NotLoggedIn => format!(
                "Please <a href=\"{}\">log in</a> to sign up for this trip.",
                policy.login_url
            ),
            Self::NoProfileInfo | Self::ProfileProblem => format!(
                "Before signing up for trips, please <a href=\"{}\">update your personal information</a>.",
                policy.edit_profile_url
            ),
            Self::IsTripWimp => {
                "In order to participate on this trip, you must be replaced in your role as the trip WIMP."
                    .to_string()
            }
            Self::AlreadyALeader => "You're already a leader on this trip!".to_string(),
            Self::MembershipNeedsRenewal => {
                "An active membership is required to participate on this trip.".to_string()
            }
            Self::WaiverNeedsRenewal => {
                "You must sign a waiver valid through the date of this trip.".to_string()
            }
        }
    }
}

/// All reasons the participant cannot attend the trip; empty means eligible.
pub fn reasons_cannot_attend(
    participant: &Participant,
    trip: &Trip,
    now: DateTime<Utc>,
    policy: &ClubPolicy,
) -> Vec<TripIneligibilityReason> {
    let mut reasons = Vec::new();

    if !profile::problems_with_profile(participant, policy).is_empty() {
        reasons.push(TripIneligibilityReason::ProfileProblem);
    }
    if trip.is_wimp(participant.id) {
        reasons.push(TripIneligibilityReason::IsTripWimp);
    }
    if trip.is_leader(participant.id) {
        reasons.push(TripIneligibilityReason::AlreadyALeader);
    }

    let membership = participant.membership.as_ref();
    if trip.membership_required && !membership::membership_active(membership, policy.local_date(now)) {
        reasons.push(TripIneligibilityReason::MembershipNeedsRenewal);
    }
    if !membership::waiver_active_until(membership, trip.trip_date) {
        reasons.push(TripIneligibilityReason::WaiverNeedsRenewal);
    }

    reasons
}

/// Reasons for whoever is viewing the trip, who may not have a profile at all.
pub fn reasons_cannot_attend_as(
    viewer: &Viewer,
    participant: Option<&Participant>,
    trip: &Trip,
    now: DateTime<Utc>,
    policy: &ClubPolicy,
) -> Vec<TripIneligibilityReason> {
    if !viewer.is_authenticated() {
        return vec![TripIneligibilityReason::NotLoggedIn];
    }
    match participant {
        None => vec![TripIneligibilityReason::NoProfileInfo],
        Some(par) => reasons_cannot_attend(par, trip, now, policy),
    }
}
