//! Database fixtures inserted directly through SeaORM.
//!
//! Each accessor on [`TestSetup`](crate::TestSetup) returns a fixture helper for one
//! area of the schema:
//!
//! - `academy` - academies and their players and documents
//! - `billing` - subscription plans, subscriptions and payments
//! - `admin` - operator accounts

pub mod academy;
pub mod admin;
pub mod billing;
