//! Trip model: scheduling window, leader policy, and placement algorithm.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Activity, Algorithm, Program};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Trip {
    pub id: Uuid,

    #[validate(length(min = 1, max = 127, message = "Trip name must be 1-127 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub activity: Activity,

    #[serde(default)]
    pub program: Program,

    #[serde(default)]
    pub algorithm: Algorithm,

    /// Local calendar date of the trip
    pub trip_date: NaiveDate,

    pub signups_open_at: DateTime<Utc>,

    /// Signups stay open until the trip if unset
    pub signups_close_at: Option<DateTime<Utc>>,

    /// Let leaders sign themselves up as trip leaders
    #[serde(default)]
    pub allow_leader_signups: bool,

    /// Let participants remove themselves any time before the trip
    #[serde(default)]
    pub let_participants_drop: bool,

    /// If false, only a current waiver is needed
    #[serde(default = "default_true")]
    pub membership_required: bool,

    /// Emergency contact on call for the trip; cannot also attend
    pub wimp_id: Option<Uuid>,

    #[serde(default)]
    pub leader_ids: Vec<Uuid>,

    #[serde(default)]
    pub creator_name: String,

    pub time_created: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Where `now` falls relative to the trip's signup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupWindow {
    NotYetOpen,
    Open,
    Closed,
}

impl Trip {
    /// Signups open at `signups_open_at` (inclusive) and close at
    /// `signups_close_at` (exclusive).
    pub fn signup_window(&self, now: DateTime<Utc>) -> SignupWindow {
        if now < self.signups_open_at {
            SignupWindow::NotYetOpen
        } else if self.signups_close_at.is_some_and(|close| now >= close) {
            SignupWindow::Closed
        } else {
            SignupWindow::Open
        }
    }

    pub fn signups_open(&self, now: DateTime<Utc>) -> bool {
        self.signup_window(now) == SignupWindow::Open
    }

    /// The trip is today or later.
    pub fn upcoming_or_today(&self, today: NaiveDate) -> bool {
        today <= self.trip_date
    }

    pub fn is_wimp(&self, participant_id: Uuid) -> bool {
        self.wimp_id == Some(participant_id)
    }

    pub fn is_leader(&self, participant_id: Uuid) -> bool {
        self.leader_ids.contains(&participant_id)
    }
}
