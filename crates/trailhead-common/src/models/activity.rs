//! Activities, programs and signup algorithms.
//!
//! An *activity* is what a leader is rated for. A *program* groups trips that
//! share rules (Winter School lottery, MITOC Rock Program, ...). The two are
//! related but distinct: a Circus program trip is led under the open `circus`
//! activity, while a Winter (outside IAP) trip still needs a Winter School rating.

use serde::{Deserialize, Serialize};

/// An activity for which a leader can be given a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    // Closed: leading requires a rating in this activity
    Biking,
    Boating,
    Cabin,
    Climbing,
    Hiking,
    WinterSchool,

    // Open: any leader may lead
    Circus,
    OfficialEvent,
    Course,
}

impl Activity {
    pub const CLOSED: [Activity; 6] = [
        Activity::Biking,
        Activity::Boating,
        Activity::Cabin,
        Activity::Climbing,
        Activity::Hiking,
        Activity::WinterSchool,
    ];

    pub const OPEN: [Activity; 3] = [Activity::Circus, Activity::OfficialEvent, Activity::Course];

    /// True if any leader (in any activity) may lead trips of this activity.
    pub fn is_open(self) -> bool {
        Self::OPEN.contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Biking => "Biking",
            Self::Boating => "Boating",
            Self::Cabin => "Cabin",
            Self::Climbing => "Climbing",
            Self::Hiking => "Hiking",
            Self::WinterSchool => "Winter School",
            Self::Circus => "Circus",
            Self::OfficialEvent => "Official Event",
            Self::Course => "Course",
        }
    }

    /// Value as stored and used in group names (`winter_school`, `climbing`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Biking => "biking",
            Self::Boating => "boating",
            Self::Cabin => "cabin",
            Self::Climbing => "climbing",
            Self::Hiking => "hiking",
            Self::WinterSchool => "winter_school",
            Self::Circus => "circus",
            Self::OfficialEvent => "official_event",
            Self::Course => "course",
        }
    }
}

/// A way to logically group related trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    /// General (official events, courses, etc.)
    #[default]
    None,
    Biking,
    Boating,
    Cabin,
    Climbing,
    Circus,
    /// 3-season hiking
    Hiking,
    MitocRockProgram,
    Service,
    /// Winter School during IAP (weekly multi-trip lottery)
    WinterSchool,
    /// Winter rules apply, but outside IAP
    WinterNonIap,
}

impl Program {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Biking => "Biking",
            Self::Boating => "Boating",
            Self::Cabin => "Cabin",
            Self::Climbing => "Climbing",
            Self::Circus => "Circus",
            Self::Hiking => "3-season hiking",
            Self::MitocRockProgram => "MITOC Rock Program",
            Self::Service => "Service",
            Self::WinterSchool => "Winter School",
            Self::WinterNonIap => "Winter (outside IAP)",
        }
    }

    /// True if any leader can create trips in this program.
    pub fn is_open(self) -> bool {
        self.required_activity().is_none()
    }

    /// The rating a leader needs to create trips in this program, if any.
    pub fn required_activity(self) -> Option<Activity> {
        match self {
            Self::Biking => Some(Activity::Biking),
            Self::Boating => Some(Activity::Boating),
            Self::Cabin => Some(Activity::Cabin),
            Self::Climbing | Self::MitocRockProgram => Some(Activity::Climbing),
            Self::Hiking => Some(Activity::Hiking),
            Self::WinterSchool | Self::WinterNonIap => Some(Activity::WinterSchool),
            Self::Circus | Self::Service | Self::None => None,
        }
    }
}

/// How participants are placed on a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Lottery,
    /// First-come, first-serve
    Fcfs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_closed_partition_activities() {
        for activity in Activity::CLOSED {
            assert!(!activity.is_open(), "{activity:?}");
        }
        for activity in Activity::OPEN {
            assert!(activity.is_open(), "{activity:?}");
        }
    }

    #[test]
    fn test_activity_wire_names() {
        let json = serde_json::to_string(&Activity::WinterSchool).unwrap();
        assert_eq!(json, "\"winter_school\"");
        assert_eq!(Activity::WinterSchool.as_str(), "winter_school");
        assert_eq!(Activity::WinterSchool.label(), "Winter School");
    }

    #[test]
    fn test_winter_programs_need_winter_school_rating() {
        assert_eq!(Program::WinterNonIap.required_activity(), Some(Activity::WinterSchool));
        assert_eq!(Program::MitocRockProgram.required_activity(), Some(Activity::Climbing));
        assert!(Program::Circus.is_open());
        assert!(!Program::Hiking.is_open());
    }
}
