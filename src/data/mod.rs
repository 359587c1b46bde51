//! Data access layer repositories.
//!
//! Repositories group the domain-specific queries of each area (academies, players,
//! billing, documents, admins, audit log, settings) on top of the generic delegates.
//! They take any connection, so passing a transaction makes their writes part of it.

pub mod academy;
pub mod activity;
pub mod admin;
pub mod document;
pub mod payment;
pub mod player;
pub mod setting;
pub mod subscription;

#[cfg(test)]
mod tests;
