//! SignUp model: a participant's request to join a trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most one per (participant, trip). On lottery trips `on_trip` stays false
/// until the lottery runs; on FCFS trips a false value means waitlisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUp {
    pub participant_id: Uuid,
    pub trip_id: Uuid,
    pub on_trip: bool,
    pub time_created: DateTime<Utc>,
}
