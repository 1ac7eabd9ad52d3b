//! API route modules.

pub mod health;
pub mod membership;
pub mod profile;
pub mod trips;
