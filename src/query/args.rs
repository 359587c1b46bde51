use sea_orm::{
    sea_query::{IntoCondition, Order},
    Condition, EntityTrait,
};

use super::unique::UniqueWhere;

/// Direction of an `order_by` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Arguments of `find_first`, `find_many` and `count`.
///
/// - `filter`: rows must match this condition, defaults to every row
/// - `order_by`: sort columns in priority order, the primary key is always appended as a tie-breaker
/// - `cursor`: start the page at this row (inclusive), skip 1 to exclude it
/// - `take`: page size, negative values take from the end of the ordering while keeping the requested order
/// - `skip`: rows dropped before `take` applies
/// - `distinct`: keep the first row of every distinct combination of these columns
pub struct FindArgs<E: EntityTrait> {
    pub filter: Condition,
    pub order_by: Vec<(E::Column, SortOrder)>,
    pub cursor: Option<Condition>,
    pub take: Option<i64>,
    pub skip: Option<u64>,
    pub distinct: Vec<E::Column>,
}

impl<E: EntityTrait> Default for FindArgs<E> {
    fn default() -> Self {
        Self {
            filter: Condition::all(),
            order_by: Vec::new(),
            cursor: None,
            take: None,
            skip: None,
            distinct: Vec::new(),
        }
    }
}

impl<E: EntityTrait> FindArgs<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow the rows with an additional condition, combined with AND.
    pub fn filter<F: IntoCondition>(mut self, condition: F) -> Self {
        self.filter = self.filter.add(condition.into_condition());
        self
    }

    pub fn order_by(mut self, column: E::Column, order: SortOrder) -> Self {
        self.order_by.push((column, order));
        self
    }

    pub fn cursor<K: UniqueWhere<E>>(mut self, key: K) -> Self {
        self.cursor = Some(key.condition());
        self
    }

    pub fn take(mut self, take: i64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn distinct(mut self, column: E::Column) -> Self {
        self.distinct.push(column);
        self
    }
}
