//! Leader rating lookups: current leadership and historical "name (rating)".
//!
//! Historical lookups ignore the `active` flag on purpose: a rating that was
//! later superseded or deactivated still describes what was true on a past trip.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::models::{Activity, LeaderRating, Participant, Trip};
use crate::policy::ClubPolicy;

/// Which of a participant's ratings to consider.
#[derive(Debug, Clone, Copy)]
pub struct RatingFilter {
    /// Only include ratings that are still active
    pub active_only: bool,
    /// Only include ratings granted at or before this instant
    pub at_time: Option<DateTime<Utc>>,
    /// Only include ratings granted strictly after this instant
    pub after_time: Option<DateTime<Utc>>,
}

impl Default for RatingFilter {
    fn default() -> Self {
        Self {
            active_only: true,
            at_time: None,
            after_time: None,
        }
    }
}

impl RatingFilter {
    /// Every rating in effect at `at_time`, active or not.
    pub fn historical(at_time: DateTime<Utc>) -> Self {
        Self {
            active_only: false,
            at_time: Some(at_time),
            after_time: None,
        }
    }

    fn admits(&self, rating: &LeaderRating) -> bool {
        (rating.active || !self.active_only)
            && self.at_time.is_none_or(|at| rating.time_created <= at)
            && self.after_time.is_none_or(|after| rating.time_created > after)
    }
}

/// All ratings matching the filter, in the participant's stored order.
pub fn ratings(participant: &Participant, filter: RatingFilter) -> impl Iterator<Item = &LeaderRating> {
    participant.ratings.iter().filter(move |r| filter.admits(r))
}

/// The participant's most recent matching rating label for `activity`.
///
/// Ratings granted at the same instant resolve to the one with the highest id.
pub fn activity_rating(participant: &Participant, activity: Activity, filter: RatingFilter) -> Option<&str> {
    ratings(participant, filter)
        .filter(|r| r.activity == activity)
        .max_by_key(|r| (r.time_created, r.id))
        .map(|r| r.rating.as_str())
}

/// The leader's name plus the rating they held going into the trip.
pub fn name_with_rating(participant: &Participant, trip: &Trip, policy: &ClubPolicy) -> String {
    name_with_activity_rating_on(participant, trip.activity, trip.trip_date, policy)
}

/// The participant's name plus their `activity` rating as of the night before
/// `query_date`, or just the name if they had none.
pub fn name_with_activity_rating_on(
    participant: &Participant,
    activity: Activity,
    query_date: NaiveDate,
    policy: &ClubPolicy,
) -> String {
    let at_time = policy.late_at_night(query_date - TimeDelta::days(1));
    match activity_rating(participant, activity, RatingFilter::historical(at_time)) {
        Some(rating) => format!("{} ({rating})", participant.name),
        None => participant.name.clone(),
    }
}

/// All of a trip's leaders, each with the rating they held for the trip.
pub fn leaders_with_rating(trip: &Trip, leaders: &[Participant], policy: &ClubPolicy) -> Vec<String> {
    leaders
        .iter()
        .map(|leader| name_with_rating(leader, trip, policy))
        .collect()
}

/// A leader holds at least one active rating, in any activity.
pub fn is_leader(participant: &Participant) -> bool {
    participant.ratings.iter().any(|r| r.active)
}

/// Can the participant lead trips of the given activity?
pub fn can_lead(participant: &Participant, activity: Activity) -> bool {
    if activity.is_open() && is_leader(participant) {
        return true;
    }
    participant
        .ratings
        .iter()
        .any(|r| r.active && r.activity == activity)
}

/// Activities the participant may lead: everything they hold an active rating
/// in, plus the open activities. Non-leaders can lead nothing.
pub fn allowed_activities(participant: &Participant) -> Vec<Activity> {
    let mut activities: Vec<Activity> = participant
        .ratings
        .iter()
        .filter(|r| r.active)
        .map(|r| r.activity)
        .collect();
    if activities.is_empty() {
        return activities;
    }
    activities.extend(Activity::OPEN);
    activities.sort();
    activities.dedup();
    activities
}
