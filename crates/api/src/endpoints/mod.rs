//! API endpoint modules.

pub mod auth;
pub mod responses;
pub mod surveys;
