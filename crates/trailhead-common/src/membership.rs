//! Membership and waiver status checks against the local cache.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::models::Membership;

/// How long a cached membership may go without a refresh.
const CACHE_LIFETIME_DAYS: i64 = 7;

/// Dues are paid through `on` (inclusive). No record means no membership.
pub fn membership_active(membership: Option<&Membership>, on: NaiveDate) -> bool {
    membership
        .and_then(|m| m.membership_expires)
        .is_some_and(|expires| expires >= on)
}

/// A signed waiver covers `day` (inclusive).
pub fn waiver_active_until(membership: Option<&Membership>, day: NaiveDate) -> bool {
    membership
        .and_then(|m| m.waiver_expires)
        .is_some_and(|expires| expires >= day)
}

/// The cached record should be refreshed from the gear database.
pub fn cache_is_stale(membership: Option<&Membership>, now: DateTime<Utc>) -> bool {
    match membership {
        None => true,
        Some(m) => m.last_cached < now - TimeDelta::days(CACHE_LIFETIME_DAYS),
    }
}
