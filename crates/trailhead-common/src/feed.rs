//! Syndication feed of upcoming trips.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Trip;
use crate::policy::ClubPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub link: String,
    /// Club-local time
    pub pub_date: DateTime<FixedOffset>,
    pub updated: DateTime<FixedOffset>,
    pub author_name: String,
    pub category: String,
    pub trip_date: NaiveDate,
}

/// Trips dated today or later, furthest out first.
pub fn upcoming_trips(trips: &[Trip], today: NaiveDate, club_name: &str, policy: &ClubPolicy) -> TripFeed {
    let mut upcoming: Vec<&Trip> = trips.iter().filter(|t| t.upcoming_or_today(today)).collect();
    upcoming.sort_by(|a, b| b.trip_date.cmp(&a.trip_date));

    TripFeed {
        title: format!("{club_name} Trips"),
        link: "/trips/".into(),
        description: format!("Upcoming trips by the {club_name}"),
        items: upcoming.into_iter().map(|trip| item(trip, policy)).collect(),
    }
}

fn item(trip: &Trip, policy: &ClubPolicy) -> FeedItem {
    FeedItem {
        id: trip.id,
        title: trip.name.clone(),
        description: trip.description.clone(),
        link: format!("/trips/{}/", trip.id),
        pub_date: trip.time_created.with_timezone(&policy.zone).fixed_offset(),
        updated: trip.last_edited.with_timezone(&policy.zone).fixed_offset(),
        author_name: trip.creator_name.clone(),
        category: trip.program.label().to_string(),
        trip_date: trip.trip_date,
    }
}
