//! Group-based access gate: who may see what, and where to send everyone else.
//!
//! Access is decided from the viewer alone (groups, superuser flag, profile
//! state). The decision is a plain value; turning it into a response is the
//! HTTP layer's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::TrailheadError;
use crate::models::{Activity, ProfileStatus, Trip};
use crate::policy::ClubPolicy;

/// Group granted to every user whose participant profile is complete.
pub const USERS_WITH_INFO: &str = "users_with_info";
/// Group for all rated leaders.
pub const LEADERS: &str = "leaders";
/// Group for the standing weekend emergency contact.
pub const WIMP: &str = "WIMP";

/// The user behind a request, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(AuthenticatedUser),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub groups: Vec<String>,
    pub is_superuser: bool,
    pub profile: ProfileStatus,
}

impl Viewer {
    pub fn from_claims(claims: &Claims) -> Result<Self, TrailheadError> {
        let id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| TrailheadError::InvalidToken)?;
        Ok(Self::User(AuthenticatedUser {
            id,
            username: claims.username.clone(),
            groups: claims.groups.clone(),
            is_superuser: claims.is_superuser,
            profile: claims.profile,
        }))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::User(user) => Some(user),
            Self::Anonymous => None,
        }
    }
}

/// Membership in at least one of `groups` is required to pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRequirement {
    pub groups: Vec<String>,
    /// Where to send authenticated users lacking the groups, so they can
    /// qualify and try again. Without one they are refused outright.
    pub redirect_to: Option<String>,
    /// Let anonymous viewers through.
    pub allow_anonymous: bool,
    pub allow_superusers: bool,
}

impl GroupRequirement {
    pub fn group_required<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            redirect_to: None,
            allow_anonymous: false,
            allow_superusers: true,
        }
    }

    pub fn redirect_to(mut self, url: impl Into<String>) -> Self {
        self.redirect_to = Some(url.into());
        self
    }

    pub fn allow_anonymous(mut self) -> Self {
        self.allow_anonymous = true;
        self
    }

    pub fn without_superusers(mut self) -> Self {
        self.allow_superusers = false;
        self
    }

    /// Users with a complete profile. Superusers get no bypass: they need a
    /// profile like everyone else.
    pub fn user_info_required(policy: &ClubPolicy) -> Self {
        Self::group_required([USERS_WITH_INFO])
            .without_superusers()
            .redirect_to(&policy.edit_profile_url)
    }

    /// Like [`Self::user_info_required`], but anonymous viewers may look too.
    pub fn participant_or_anon(policy: &ClubPolicy) -> Self {
        Self::user_info_required(policy).allow_anonymous()
    }

    /// Chairs of any of the given activities (all closed activities if empty).
    pub fn chairs_only(activities: &[Activity]) -> Self {
        let activities = if activities.is_empty() {
            &Activity::CLOSED[..]
        } else {
            activities
        };
        let mut groups: Vec<String> = activities.iter().filter_map(|a| chair_group(*a)).collect();
        groups.sort();
        groups.dedup();
        Self::group_required(groups)
    }
}

/// Outcome of the access gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Redirect { location: String },
    Forbidden,
}

/// Decide whether `viewer` may access `path`.
pub fn check_access(
    viewer: &Viewer,
    requirement: &GroupRequirement,
    path: &str,
    policy: &ClubPolicy,
) -> AccessDecision {
    let user = match viewer {
        Viewer::Anonymous if requirement.allow_anonymous => return AccessDecision::Allow,
        Viewer::Anonymous => {
            return AccessDecision::Redirect {
                location: with_next(&policy.login_url, path),
            };
        }
        Viewer::User(user) => user,
    };

    if user.profile != ProfileStatus::Current {
        return AccessDecision::Redirect {
            location: with_next(&policy.edit_profile_url, path),
        };
    }

    if in_any_group(viewer, &requirement.groups, requirement.allow_superusers) {
        return AccessDecision::Allow;
    }

    match &requirement.redirect_to {
        Some(url) => AccessDecision::Redirect {
            location: with_next(url, path),
        },
        None => AccessDecision::Forbidden,
    }
}

fn with_next(url: &str, path: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", path)
        .finish();
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}

/// Membership in any of `groups`; superusers pass when allowed.
pub fn in_any_group<S: AsRef<str>>(viewer: &Viewer, groups: &[S], allow_superusers: bool) -> bool {
    let Some(user) = viewer.user() else {
        return false;
    };
    if allow_superusers && user.is_superuser {
        return true;
    }
    groups
        .iter()
        .any(|wanted| user.groups.iter().any(|g| g == wanted.as_ref()))
}

/// Name of the group whose members chair the activity. Open activities have no chair.
pub fn chair_group(activity: Activity) -> Option<String> {
    match activity {
        Activity::WinterSchool => Some("WSC".to_string()),
        a if a.is_open() => None,
        a => Some(format!("{}_chair", a.as_str())),
    }
}

pub fn is_chair(viewer: &Viewer, activity: Activity, allow_superusers: bool) -> bool {
    chair_group(activity).is_some_and(|group| in_any_group(viewer, &[group], allow_superusers))
}

/// Activities the viewer chairs.
pub fn chair_activities(viewer: &Viewer, allow_superusers: bool) -> Vec<Activity> {
    Activity::CLOSED
        .into_iter()
        .filter(|a| is_chair(viewer, *a, allow_superusers))
        .collect()
}

/// The viewer is the standing WIMP, or the WIMP of a trip that hasn't happened yet.
///
/// Trips dated `today` still count: the WIMP is on call through the night of the trip.
pub fn is_the_wimp(viewer: &Viewer, participant_id: Option<Uuid>, trips: &[Trip], today: NaiveDate) -> bool {
    if in_any_group(viewer, &[WIMP], true) {
        return true;
    }
    let Some(participant_id) = participant_id else {
        return false;
    };
    trips
        .iter()
        .any(|trip| trip.is_wimp(participant_id) && trip.upcoming_or_today(today))
}
