//! Profile completeness rules.
//!
//! A participant may browse with an incomplete profile, but any problem reported
//! here blocks trip signups until it is corrected. Messages are safe to render
//! as HTML: the only user-controlled text (the email address) is escaped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::html;
use crate::models::{Participant, ProfileStatus};
use crate::policy::ClubPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileProblem {
    MissingFullName,
    EmailNotVerified,
    NoEmergencyCell,
    StaleAffiliation,
}

/// A problem code plus the message shown to the participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileIssue {
    pub problem: ProfileProblem,
    /// Trusted HTML
    pub message: String,
}

impl ProfileIssue {
    fn new(problem: ProfileProblem, message: impl Into<String>) -> Self {
        Self {
            problem,
            message: message.into(),
        }
    }
}

/// Every problem with the participant's profile, in a stable order.
pub fn problems_with_profile(participant: &Participant, policy: &ClubPolicy) -> Vec<ProfileIssue> {
    let mut issues = Vec::new();

    if participant.name.split_whitespace().count() < 2 {
        issues.push(ProfileIssue::new(
            ProfileProblem::MissingFullName,
            "Please supply your full legal name.",
        ));
    }

    if !participant.verified_emails.iter().any(|e| *e == participant.email) {
        let email = html::escape(&participant.email);
        issues.push(ProfileIssue::new(
            ProfileProblem::EmailNotVerified,
            format!(
                "Please <a href=\"{}\">verify that you own {email}</a>, \
                 or set your email address to one of your verified addresses.",
                policy.manage_emails_url
            ),
        ));
    }

    let has_cell = participant
        .emergency_contact
        .as_ref()
        .is_some_and(|contact| !contact.cell_phone.trim().is_empty());
    if !has_cell {
        issues.push(ProfileIssue::new(
            ProfileProblem::NoEmergencyCell,
            "Please supply a valid number for your emergency contact.",
        ));
    }

    if affiliation_dated(participant, policy) {
        issues.push(ProfileIssue::new(
            ProfileProblem::StaleAffiliation,
            "Please update your MIT affiliation.",
        ));
    }

    issues
}

/// The affiliation on file is a legacy code, or was declared before the
/// current affiliation categories existed.
pub fn affiliation_dated(participant: &Participant, policy: &ClubPolicy) -> bool {
    participant.affiliation.is_legacy() || participant.profile_last_updated < policy.affiliation_cutoff
}

/// The participant confirmed their information recently enough to go on trips.
pub fn info_current(participant: &Participant, now: DateTime<Utc>, policy: &ClubPolicy) -> bool {
    let since_last_update = now - participant.profile_last_updated;
    since_last_update.num_days() < policy.must_update_after_days
}

/// Nothing in the profile stands in the way of trip attendance.
///
/// Membership and waiver status are checked separately.
pub fn profile_allows_trip_attendance(
    participant: &Participant,
    now: DateTime<Utc>,
    policy: &ClubPolicy,
) -> bool {
    info_current(participant, now, policy) && problems_with_profile(participant, policy).is_empty()
}

/// Summarize a (possibly missing) profile for the access gate.
pub fn profile_status(
    participant: Option<&Participant>,
    now: DateTime<Utc>,
    policy: &ClubPolicy,
) -> ProfileStatus {
    match participant {
        None => ProfileStatus::Missing,
        Some(par) if profile_allows_trip_attendance(par, now, policy) => ProfileStatus::Current,
        Some(_) => ProfileStatus::NeedsUpdate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, now, participant};
    use crate::models::Affiliation;

    fn problems(par: &Participant) -> Vec<ProfileProblem> {
        problems_with_profile(par, &ClubPolicy::default())
            .into_iter()
            .map(|issue| issue.problem)
            .collect()
    }

    fn messages(par: &Participant) -> Vec<String> {
        problems_with_profile(par, &ClubPolicy::default())
            .into_iter()
            .map(|issue| issue.message)
            .collect()
    }

    #[test]
    fn test_our_fixture_is_okay() {
        assert!(problems_with_profile(&participant("Test Participant"), &ClubPolicy::default()).is_empty());
    }

    #[test]
    fn test_no_cell_phone_on_emergency_contact() {
        let mut par = participant("Test Participant");
        if let Some(contact) = par.emergency_contact.as_mut() {
            contact.cell_phone = String::new();
        }
        assert_eq!(
            messages(&par),
            vec!["Please supply a valid number for your emergency contact.".to_string()]
        );
    }

    #[test]
    fn test_missing_emergency_contact() {
        let mut par = participant("Test Participant");
        par.emergency_contact = None;
        assert_eq!(problems(&par), vec![ProfileProblem::NoEmergencyCell]);
    }

    #[test]
    fn test_full_name_required() {
        let par = participant("Cher");
        assert_eq!(problems(&par), vec![ProfileProblem::MissingFullName]);
        assert_eq!(messages(&par), vec!["Please supply your full legal name.".to_string()]);
    }

    #[test]
    fn test_whitespace_padding_is_not_a_full_name() {
        let mut par = participant("Cher");
        par.name = " Cher ".into();
        assert_eq!(problems(&par), vec![ProfileProblem::MissingFullName]);
    }

    #[test]
    fn test_verified_email_required() {
        let mut par = participant("Test Participant");
        par.email = "not-verified@example.com".into();
        assert_eq!(
            messages(&par),
            vec![
                "Please <a href=\"/accounts/email/\">verify that you own not-verified@example.com</a>, \
                 or set your email address to one of your verified addresses."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_xss_on_email_prevented() {
        let mut par = participant("Test Participant");
        par.email = "</a><script>alert('hax')</script>@hacks.tld".into();
        par.verified_emails.clear();
        assert_eq!(
            messages(&par),
            vec![
                "Please <a href=\"/accounts/email/\">verify that you own \
                 &lt;/a&gt;&lt;script&gt;alert(&#39;hax&#39;)&lt;/script&gt;@hacks.tld</a>, \
                 or set your email address to one of your verified addresses."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_old_student_affiliation_dated() {
        let mut par = participant("Test Participant");
        par.affiliation = Affiliation::Student;
        assert_eq!(
            messages(&par),
            vec!["Please update your MIT affiliation.".to_string()]
        );
    }

    #[test]
    fn test_not_updated_since_affiliation_overhaul() {
        let mut par = participant("Test Participant");
        // Right before the new categories were released
        par.profile_last_updated = at(2018, 10, 27, 3, 15);
        assert_eq!(problems(&par), vec![ProfileProblem::StaleAffiliation]);

        par.profile_last_updated = ClubPolicy::default().affiliation_cutoff;
        assert!(problems(&par).is_empty());
    }

    #[test]
    fn test_all_problems_reported_in_order() {
        let mut par = participant("Houdini");
        par.email = "houdini@example.com".into();
        par.verified_emails.clear();
        par.emergency_contact = None;
        par.affiliation = Affiliation::MitLegacy;
        assert_eq!(
            problems(&par),
            vec![
                ProfileProblem::MissingFullName,
                ProfileProblem::EmailNotVerified,
                ProfileProblem::NoEmergencyCell,
                ProfileProblem::StaleAffiliation,
            ]
        );
    }

    #[test]
    fn test_info_current_expires_after_configured_days() {
        let policy = ClubPolicy::default();
        let par = participant("Test Participant"); // updated 2025-09-01
        assert!(info_current(&par, now(), &policy));
        assert!(!info_current(&par, at(2026, 2, 28, 10, 0), &policy));
    }

    #[test]
    fn test_profile_status() {
        let policy = ClubPolicy::default();
        assert_eq!(profile_status(None, now(), &policy), ProfileStatus::Missing);

        let par = participant("Test Participant");
        assert_eq!(profile_status(Some(&par), now(), &policy), ProfileStatus::Current);

        let cher = participant("Cher");
        assert_eq!(profile_status(Some(&cher), now(), &policy), ProfileStatus::NeedsUpdate);
    }

    #[test]
    fn test_problem_codes_serialize_screaming() {
        let json = serde_json::to_string(&ProfileProblem::EmailNotVerified).unwrap();
        assert_eq!(json, "\"EMAIL_NOT_VERIFIED\"");
    }
}
