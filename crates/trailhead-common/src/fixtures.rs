//! Test builders. Every participant here starts with a complete profile and a
//! current membership, so a test only spells out what it breaks.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{
    Activity, Affiliation, Algorithm, EmergencyContact, LeaderRating, Membership, Participant,
    Program, SignUp, Trip,
};
use crate::policy::ClubPolicy;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Club-local wall-clock time.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    ClubPolicy::default().localize(day(y, m, d).and_hms_opt(h, min, 0).unwrap())
}

pub fn participant(name: &str) -> Participant {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    Participant {
        id: Uuid::now_v7(),
        name: name.to_string(),
        email: email.clone(),
        verified_emails: vec![email],
        affiliation: Affiliation::NonAffiliate,
        profile_last_updated: at(2025, 9, 1, 10, 0),
        emergency_contact: Some(EmergencyContact {
            name: "My Mother".into(),
            cell_phone: "781-555-0342".into(),
            relationship: "Mother".into(),
            email: "mum@example.com".into(),
        }),
        ratings: Vec::new(),
        membership: Some(Membership {
            membership_expires: Some(day(2026, 12, 1)),
            waiver_expires: Some(day(2026, 12, 1)),
            last_cached: at(2025, 12, 1, 9, 0),
        }),
    }
}

pub fn rating(activity: Activity, label: &str, active: bool, granted: DateTime<Utc>) -> LeaderRating {
    LeaderRating {
        id: Uuid::now_v7(),
        activity,
        rating: label.to_string(),
        active,
        time_created: granted,
        notes: String::new(),
    }
}

pub fn leader(name: &str, activity: Activity) -> Participant {
    let mut par = participant(name);
    par.ratings.push(rating(activity, "Leader", true, at(2025, 1, 10, 9, 0)));
    par
}

/// An upcoming FCFS climbing trip, open for signups on 2025-12-11 at noon.
pub fn trip() -> Trip {
    Trip {
        id: Uuid::now_v7(),
        name: "Some Cool Upcoming Trip".into(),
        description: "Multi-pitch at Cathedral".into(),
        activity: Activity::Climbing,
        program: Program::Climbing,
        algorithm: Algorithm::Fcfs,
        trip_date: day(2025, 12, 14),
        signups_open_at: at(2025, 12, 10, 12, 0),
        signups_close_at: Some(at(2025, 12, 13, 21, 30)),
        allow_leader_signups: false,
        let_participants_drop: false,
        membership_required: true,
        wimp_id: None,
        leader_ids: Vec::new(),
        creator_name: "Trip Creator".into(),
        time_created: at(2025, 12, 1, 8, 0),
        last_edited: at(2025, 12, 2, 8, 0),
    }
}

pub fn signup(participant: &Participant, trip: &Trip, on_trip: bool) -> SignUp {
    SignUp {
        participant_id: participant.id,
        trip_id: trip.id,
        on_trip,
        time_created: at(2025, 12, 10, 12, 5),
    }
}

/// Frozen "now" for signup tests: 2025-12-11 12:00 local.
pub fn now() -> DateTime<Utc> {
    at(2025, 12, 11, 12, 0)
}
