//! Leader ratings: a leader is just a participant with at least one active rating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Activity;

/// One grant of a rating. Ratings are never edited in place: a new rating
/// supersedes older ones for the same activity, and deactivation flips `active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderRating {
    /// UUID v7, so a later grant has a larger id
    pub id: Uuid,
    pub activity: Activity,
    /// Free-form label, e.g. "co-leader" or "Full leader"
    pub rating: String,
    pub active: bool,
    /// When the rating was granted
    pub time_created: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}
