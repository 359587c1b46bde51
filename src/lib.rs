//! Multi-tenant data-access layer for academy management.
//!
//! Academies (tenants) enroll players, upload player documents within their plan's
//! storage quota and pay for subscriptions. The crate exposes a generic per-model
//! [`query::Delegate`] over SeaORM, an [`client::AcademyClient`] owning the pool and
//! interactive transactions, repositories for domain-specific queries and services
//! enforcing the business rules on top of them.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod query;
pub mod service;
pub mod startup;
pub mod util;
