//! Generic per-model delegates.
//!
//! A [`Delegate`] wraps a connection (pool or transaction) and exposes the uniform
//! operation set shared by every model: unique and filtered lookups, cursor pagination,
//! single and batch writes, counting, aggregation and grouping. Which models accept
//! writes after insert is decided by the [`MutableEntity`] marker.

pub mod aggregate;
pub mod args;
pub mod delegate;
pub mod traits;
pub mod unique;

mod pagination;

pub use aggregate::{
    AggregateArgs, AggregateFunc, AggregateResult, AggregateSelection, Comparison, GroupByArgs,
    GroupOrder, GroupRow, Having,
};
pub use args::{FindArgs, SortOrder};
pub use delegate::{Delegate, Delegates};
pub use traits::{DelegateEntity, MutableEntity};
pub use unique::{
    AcademyKey, AdminKey, PaymentKey, SubscriptionPlanKey, SystemSettingKey, UniqueWhere,
};

#[cfg(test)]
mod tests;
