//! Which signup controls to show a participant for a given trip.
//!
//! Checks apply in a fixed order: reasons the participant cannot attend, then
//! the trip's signup window, then any existing signup, and finally the open
//! signup form. An ineligible participant therefore never sees a form, even
//! while signups are open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::eligibility::{self, TripIneligibilityReason};
use crate::models::{Algorithm, Participant, SignUp, SignupWindow, Trip};
use crate::policy::ClubPolicy;
use crate::ratings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignupState {
    /// The form is suppressed in favor of the reasons.
    Ineligible {
        reasons: Vec<TripIneligibilityReason>,
        window: SignupWindow,
    },
    NotYetOpen {
        early_leader_signup_allowed: bool,
    },
    Closed,
    AlreadyOnTrip {
        drop_allowed: bool,
    },
    /// Waitlisted on FCFS trips; awaiting the draw on lottery trips.
    AlreadyOnWaitlist {
        drop_allowed: bool,
    },
    Open {
        leader_signup_allowed: bool,
    },
}

impl SignupState {
    /// The informational banner above the signup controls.
    pub fn headline(&self, algorithm: Algorithm) -> &'static str {
        match self {
            Self::Ineligible { window, .. } => window_headline(*window),
            Self::NotYetOpen { .. } => window_headline(SignupWindow::NotYetOpen),
            Self::Closed => window_headline(SignupWindow::Closed),
            Self::Open { .. } => window_headline(SignupWindow::Open),
            Self::AlreadyOnTrip { .. } => "You are signed up for this trip.",
            Self::AlreadyOnWaitlist { .. } => match algorithm {
                Algorithm::Lottery => {
                    "You're signed up for this trip's lottery. \
                     You'll find out if you have a spot after the lottery runs."
                }
                Algorithm::Fcfs => "You are on the waiting list for this trip.",
            },
        }
    }

    /// Extra notice for leaders who can sign up before everyone else.
    pub fn leader_notice(&self) -> Option<&'static str> {
        match self {
            Self::NotYetOpen {
                early_leader_signup_allowed: true,
            } => Some("However, you can sign up early as a leader!"),
            _ => None,
        }
    }

    /// A signup form (participant and/or leader) should be rendered.
    pub fn shows_form(&self) -> bool {
        match self {
            Self::Open { .. } => true,
            Self::NotYetOpen {
                early_leader_signup_allowed,
            } => *early_leader_signup_allowed,
            _ => false,
        }
    }

    /// Shown to signed-up participants who cannot remove themselves.
    pub fn drop_hint(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyOnTrip { drop_allowed: false } | Self::AlreadyOnWaitlist { drop_allowed: false } => {
                Some("If you can no longer attend this trip, let your leaders know.")
            }
            _ => None,
        }
    }
}

fn window_headline(window: SignupWindow) -> &'static str {
    match window {
        SignupWindow::Open => "Signups are open!",
        SignupWindow::NotYetOpen => "Signups for this trip are not yet open.",
        SignupWindow::Closed => "Signups for this trip are closed.",
    }
}

/// Resolve the signup state for a participant viewing a trip.
///
/// `existing_signup` must belong to this participant and trip, if given.
pub fn signup_state(
    participant: &Participant,
    trip: &Trip,
    existing_signup: Option<&SignUp>,
    now: DateTime<Utc>,
    policy: &ClubPolicy,
) -> SignupState {
    let window = trip.signup_window(now);

    let reasons = eligibility::reasons_cannot_attend(participant, trip, now, policy);
    if !reasons.is_empty() {
        return SignupState::Ineligible { reasons, window };
    }

    match window {
        SignupWindow::NotYetOpen => {
            return SignupState::NotYetOpen {
                early_leader_signup_allowed: leader_signup_allowed(participant, trip, now, policy),
            };
        }
        SignupWindow::Closed => return SignupState::Closed,
        SignupWindow::Open => {}
    }

    if let Some(signup) = existing_signup {
        let drop_allowed = drop_allowed(trip);
        return if signup.on_trip {
            SignupState::AlreadyOnTrip { drop_allowed }
        } else {
            SignupState::AlreadyOnWaitlist { drop_allowed }
        };
    }

    SignupState::Open {
        leader_signup_allowed: leader_signup_allowed(participant, trip, now, policy),
    }
}

/// The participant may sign up as a leader: they can lead the trip's activity,
/// the trip hasn't happened, and the trip takes leader signups.
///
/// This decides what to display; it is not validation of a leader signup.
pub fn leader_signup_allowed(
    participant: &Participant,
    trip: &Trip,
    now: DateTime<Utc>,
    policy: &ClubPolicy,
) -> bool {
    if !ratings::is_leader(participant) {
        return false;
    }
    trip.upcoming_or_today(policy.local_date(now))
        && trip.allow_leader_signups
        && ratings::can_lead(participant, trip.activity)
}

/// Participants may remove themselves. Lottery trips always allow it.
pub fn drop_allowed(trip: &Trip) -> bool {
    trip.algorithm == Algorithm::Lottery || trip.let_participants_drop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, leader, now, participant, signup, trip};
    use crate::models::{Activity, Program};

    fn state(par: &Participant, trip: &Trip, existing: Option<&SignUp>) -> SignupState {
        signup_state(par, trip, existing, now(), &ClubPolicy::default())
    }

    #[test]
    fn test_participant_with_problems_must_correct_them_first() {
        let houdini = participant("Houdini");
        let trip = trip();
        let found = state(&houdini, &trip, None);
        assert_eq!(
            found,
            SignupState::Ineligible {
                reasons: vec![TripIneligibilityReason::ProfileProblem],
                window: SignupWindow::Open,
            }
        );
        assert!(!found.shows_form());
    }

    #[test]
    fn test_wimp_cannot_sign_up_for_trip() {
        let wimp = participant("Test Participant");
        let trip = Trip {
            wimp_id: Some(wimp.id),
            ..trip()
        };
        let found = state(&wimp, &trip, None);

        // Signups are open, but the WIMP only sees why they can't attend
        assert_eq!(found.headline(trip.algorithm), "Signups are open!");
        assert_eq!(
            found,
            SignupState::Ineligible {
                reasons: vec![TripIneligibilityReason::IsTripWimp],
                window: SignupWindow::Open,
            }
        );
        assert!(!found.shows_form());
    }

    #[test]
    fn test_wimp_ineligible_regardless_of_window() {
        let wimp = participant("Test Participant");
        let trip = Trip {
            wimp_id: Some(wimp.id),
            signups_close_at: Some(at(2025, 12, 11, 11, 11)),
            ..trip()
        };
        assert!(matches!(
            state(&wimp, &trip, None),
            SignupState::Ineligible {
                window: SignupWindow::Closed,
                ..
            }
        ));
    }

    #[test]
    fn test_wimp_leader_gets_no_early_signup() {
        let wimp = leader("Bike Leader", Activity::Biking);
        let trip = Trip {
            signups_open_at: at(2025, 12, 12, 13, 45),
            allow_leader_signups: true,
            activity: Activity::Biking,
            program: Program::Biking,
            wimp_id: Some(wimp.id),
            ..trip()
        };
        let found = state(&wimp, &trip, None);
        assert_eq!(
            found,
            SignupState::Ineligible {
                reasons: vec![TripIneligibilityReason::IsTripWimp],
                window: SignupWindow::NotYetOpen,
            }
        );
        assert_eq!(found.leader_notice(), None);
        assert!(!found.shows_form());
    }

    #[test]
    fn test_leader_signup_allowed_for_open_activities() {
        let circus_trip = Trip {
            allow_leader_signups: true,
            activity: Activity::Circus,
            program: Program::Circus,
            ..trip()
        };
        let climber = leader("Climbing Leader", Activity::Climbing);
        assert_eq!(
            state(&climber, &circus_trip, None),
            SignupState::Open {
                leader_signup_allowed: true
            }
        );
    }

    #[test]
    fn test_leaders_with_rating_can_sign_up() {
        let climbing_trip = Trip {
            allow_leader_signups: true,
            ..trip()
        };
        let climber = leader("Climbing Leader", Activity::Climbing);
        assert_eq!(
            state(&climber, &climbing_trip, None),
            SignupState::Open {
                leader_signup_allowed: true
            }
        );

        let hiker = leader("Hiking Leader", Activity::Hiking);
        assert_eq!(
            state(&hiker, &climbing_trip, None),
            SignupState::Open {
                leader_signup_allowed: false
            }
        );
    }

    #[test]
    fn test_leader_signups_must_be_enabled() {
        let climber = leader("Climbing Leader", Activity::Climbing);
        assert_eq!(
            state(&climber, &trip(), None),
            SignupState::Open {
                leader_signup_allowed: false
            }
        );
    }

    #[test]
    fn test_not_yet_open() {
        let trip = Trip {
            signups_open_at: at(2025, 12, 12, 13, 45),
            signups_close_at: Some(at(2025, 12, 13, 23, 59)),
            allow_leader_signups: true,
            activity: Activity::Biking,
            program: Program::Biking,
            ..trip()
        };

        // The participant may attend this trip, signups just aren't open.
        let par = participant("Test Participant");
        let found = state(&par, &trip, None);
        assert_eq!(found.headline(trip.algorithm), "Signups for this trip are not yet open.");
        assert_eq!(found.leader_notice(), None);
        assert!(!found.shows_form());

        let biker = leader("Bike Leader", Activity::Biking);
        let found = state(&biker, &trip, None);
        assert_eq!(found.headline(trip.algorithm), "Signups for this trip are not yet open.");
        assert_eq!(found.leader_notice(), Some("However, you can sign up early as a leader!"));
        assert!(found.shows_form());
    }

    #[test]
    fn test_closed_trip() {
        let trip = Trip {
            signups_close_at: Some(at(2025, 12, 11, 11, 11)),
            ..trip()
        };
        let found = state(&participant("Test Participant"), &trip, None);
        assert_eq!(found, SignupState::Closed);
        assert_eq!(found.headline(trip.algorithm), "Signups for this trip are closed.");
        assert!(!found.shows_form());
    }

    #[test]
    fn test_already_signed_up() {
        let trip = trip();
        let par = participant("Test Participant");
        let existing = signup(&par, &trip, true);

        let found = state(&par, &trip, Some(&existing));
        assert_eq!(found, SignupState::AlreadyOnTrip { drop_allowed: false });
        assert!(!found.shows_form());
        assert_eq!(found.headline(trip.algorithm), "You are signed up for this trip.");
        assert_eq!(
            found.drop_hint(),
            Some("If you can no longer attend this trip, let your leaders know.")
        );
    }

    #[test]
    fn test_signed_up_for_lottery_trip_but_may_drop() {
        let trip = Trip {
            algorithm: Algorithm::Lottery,
            let_participants_drop: false,
            ..trip()
        };
        let par = participant("Test Participant");
        let existing = signup(&par, &trip, false);

        let found = state(&par, &trip, Some(&existing));
        assert_eq!(found, SignupState::AlreadyOnWaitlist { drop_allowed: true });
        let msg = found.headline(trip.algorithm);
        assert!(msg.contains("You're signed up for this trip's lottery."));
        assert!(msg.contains("You'll find out if you have a spot after the lottery runs."));
        assert_eq!(found.drop_hint(), None);
    }

    #[test]
    fn test_signed_up_for_fcfs_trip_but_may_drop() {
        let par = participant("Test Participant");
        let droppable = Trip {
            let_participants_drop: true,
            ..trip()
        };
        let existing = signup(&par, &droppable, true);
        assert_eq!(
            state(&par, &droppable, Some(&existing)),
            SignupState::AlreadyOnTrip { drop_allowed: true }
        );

        let locked = Trip {
            let_participants_drop: false,
            ..droppable
        };
        assert_eq!(
            state(&par, &locked, Some(&existing)),
            SignupState::AlreadyOnTrip { drop_allowed: false }
        );
    }

    #[test]
    fn test_fcfs_waitlist_headline() {
        let trip = trip();
        let par = participant("Test Participant");
        let existing = signup(&par, &trip, false);
        let found = state(&par, &trip, Some(&existing));
        assert_eq!(found.headline(trip.algorithm), "You are on the waiting list for this trip.");
    }

    #[test]
    fn test_no_leader_signup_after_trip() {
        let trip = Trip {
            allow_leader_signups: true,
            signups_close_at: None,
            ..trip() // 2025-12-14
        };
        let climber = leader("Climbing Leader", Activity::Climbing);
        let policy = ClubPolicy::default();
        assert!(leader_signup_allowed(&climber, &trip, at(2025, 12, 14, 23, 0), &policy));
        assert!(!leader_signup_allowed(&climber, &trip, at(2025, 12, 15, 0, 30), &policy));
    }

    #[test]
    fn test_state_serializes_tagged() {
        let json = serde_json::to_value(SignupState::Open {
            leader_signup_allowed: true,
        })
        .unwrap();
        assert_eq!(json["state"], "OPEN");
        assert_eq!(json["leader_signup_allowed"], true);
    }
}
