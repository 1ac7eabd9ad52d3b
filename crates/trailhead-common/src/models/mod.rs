//! Core domain models shared across all Trailhead crates.
//!
//! These are read-only snapshots: the persistence layer that owns them lives
//! elsewhere and hands us a self-consistent copy per request. Ids are UUIDs
//! (v7 where time ordering matters, e.g. leader ratings).

pub mod activity;
pub mod membership;
pub mod participant;
pub mod rating;
pub mod signup;
pub mod trip;

/// Re-export all model types for convenience.
pub use activity::*;
pub use membership::*;
pub use participant::*;
pub use rating::*;
pub use signup::*;
pub use trip::*;
