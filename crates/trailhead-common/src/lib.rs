//! # trailhead-common
//!
//! Shared types, configuration, error handling, and the trip signup rules used
//! across all Trailhead crates. Everything that decides eligibility lives here as
//! pure functions over caller-supplied snapshots; nothing in this crate reads the
//! wall clock or touches storage.

pub mod auth;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod feed;
pub mod html;
pub mod membership;
pub mod models;
pub mod permissions;
pub mod policy;
pub mod profile;
pub mod ratings;
pub mod signup;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;
