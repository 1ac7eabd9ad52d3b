//! Participant model: anyone going on a trip, leaders included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{LeaderRating, Membership};

/// A participant profile snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Participant {
    pub id: Uuid,

    /// Full legal name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    /// Address shared with leaders and other participants
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,

    /// Addresses the user has proven they own
    #[serde(default)]
    pub verified_emails: Vec<String>,

    pub affiliation: Affiliation,

    /// Last time the participant themselves confirmed their profile
    pub profile_last_updated: DateTime<Utc>,

    pub emergency_contact: Option<EmergencyContact>,

    /// Full rating history, active and inactive
    #[serde(default)]
    pub ratings: Vec<LeaderRating>,

    /// Cached membership; absent if never looked up
    pub membership: Option<Membership>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    /// May be blank if the participant never supplied one
    #[serde(default)]
    pub cell_phone: String,
    pub relationship: String,
    pub email: String,
}

/// Affiliation codes. Single-letter codes predate the current categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affiliation {
    #[serde(rename = "MU")]
    MitUndergrad,
    #[serde(rename = "NU")]
    NonMitUndergrad,
    #[serde(rename = "MG")]
    MitGradStudent,
    #[serde(rename = "NG")]
    NonMitGradStudent,
    #[serde(rename = "MA")]
    MitAffiliate,
    #[serde(rename = "ML")]
    MitAlum,
    #[serde(rename = "NA")]
    NonAffiliate,

    // Legacy codes
    #[serde(rename = "S")]
    Student,
    #[serde(rename = "M")]
    MitLegacy,
    #[serde(rename = "N")]
    NonAffiliateLegacy,
}

impl Affiliation {
    /// Codes from before we recorded level of study and MIT status.
    pub fn is_legacy(self) -> bool {
        matches!(self, Self::Student | Self::MitLegacy | Self::NonAffiliateLegacy)
    }

    pub fn is_student(self) -> bool {
        matches!(
            self,
            Self::MitUndergrad | Self::NonMitUndergrad | Self::MitGradStudent | Self::NonMitGradStudent
        )
    }
}

/// How far along a user is in providing participant information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    /// Logged in, but never created a participant profile
    Missing,
    /// Profile exists but is dated or has problems
    NeedsUpdate,
    Current,
}
