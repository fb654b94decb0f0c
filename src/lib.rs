//! Small terminal mood tracker. Log how you feel during a session, look at the last week of
//! entries as charts, and let a tiny daemon remind you to log in the evening.

pub mod cli;
pub mod daemon;
pub mod insights;
pub mod mood;
pub mod utils;
