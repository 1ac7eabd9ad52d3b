//! Club policy: the explicit "environment" every time-dependent rule receives.
//!
//! Rules never consult an ambient clock or global config. Callers build one
//! [`ClubPolicy`] (usually from [`ClubConfig`]) and pass it alongside the
//! evaluation instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::ClubConfig;
use crate::error::{TrailheadError, TrailheadResult};

/// 2018-10-27 04:30 US/Eastern (EDT), when the new affiliation categories shipped.
const AFFILIATION_CUTOFF_SECS: i64 = 1_540_629_000;

const DEFAULT_MUST_UPDATE_AFTER_DAYS: i64 = 180;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubPolicy {
    /// Local time of the club. Trip dates and membership dates are local dates.
    pub zone: Tz,
    pub must_update_after_days: i64,
    pub affiliation_cutoff: DateTime<Utc>,
    pub manage_emails_url: String,
    pub edit_profile_url: String,
    pub login_url: String,
}

impl Default for ClubPolicy {
    fn default() -> Self {
        Self {
            zone: chrono_tz::America::New_York,
            must_update_after_days: DEFAULT_MUST_UPDATE_AFTER_DAYS,
            affiliation_cutoff: DateTime::UNIX_EPOCH + TimeDelta::seconds(AFFILIATION_CUTOFF_SECS),
            manage_emails_url: "/accounts/email/".into(),
            edit_profile_url: "/profile/edit/".into(),
            login_url: "/accounts/login/".into(),
        }
    }
}

impl ClubPolicy {
    pub fn from_config(club: &ClubConfig) -> TrailheadResult<Self> {
        let zone: Tz = club.time_zone.parse().map_err(|e| TrailheadError::Validation {
            message: format!("unknown time_zone {:?}: {e}", club.time_zone),
        })?;
        if club.must_update_after_days <= 0 {
            return Err(TrailheadError::Validation {
                message: "must_update_after_days must be positive".into(),
            });
        }

        Ok(Self {
            zone,
            must_update_after_days: club.must_update_after_days,
            affiliation_cutoff: club.affiliation_cutoff,
            manage_emails_url: club.manage_emails_url.clone(),
            edit_profile_url: club.edit_profile_url.clone(),
            login_url: club.login_url.clone(),
        })
    }

    /// The club-local calendar date at `now`.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.zone).date_naive()
    }

    /// Interpret a wall-clock time in the club's zone.
    ///
    /// A time repeated when clocks fall back resolves to its first occurrence.
    /// A time skipped when clocks spring forward takes the offset in effect
    /// before the jump, landing just after it.
    pub fn localize(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.zone.from_local_datetime(&local).earliest() {
            Some(dt) => dt.with_timezone(&Utc),
            None => {
                let offset = self.zone.offset_from_utc_datetime(&local).fix();
                (local - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc()
            }
        }
    }

    /// Start of `date` in club-local time.
    pub fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        self.localize(date.and_time(NaiveTime::default()))
    }

    /// 23:59:59 on `date`, since midnight is technically the next day.
    pub fn late_at_night(&self, date: NaiveDate) -> DateTime<Utc> {
        self.midnight(date) + TimeDelta::days(1) - TimeDelta::seconds(1)
    }
}
