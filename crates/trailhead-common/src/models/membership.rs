//! Membership model: cached dues and waiver status.
//!
//! The club's gear database is the authority; this is a local cache. Both
//! dates are the *minimum* expiration, since the authority may know of a newer
//! renewal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Last day annual dues are valid
    pub membership_expires: Option<NaiveDate>,
    /// Last day the liability waiver is valid
    pub waiver_expires: Option<NaiveDate>,
    pub last_cached: DateTime<Utc>,
}
