//! Utility functions shared by services.
//!
//! Password hashing for academy and admin accounts, and the date arithmetic used by
//! subscription periods.

pub mod password;
pub mod time;
