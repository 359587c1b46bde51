//! Data transfer objects returned by services and the inputs they accept.
//!
//! DTOs never carry password hashes; services convert entity models into them at the
//! boundary.

pub mod academy;
pub mod activity;
pub mod admin;
pub mod document;
pub mod player;
