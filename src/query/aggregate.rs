use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    Condition, EntityTrait, IdenStatic, QueryFilter, QueryOrder, QueryResult, QuerySelect, Select,
    Value,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::query::QueryError;

const COUNT_ALL_ALIAS: &str = "_count";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Count,
    Avg,
    Sum,
    Min,
    Max,
}

impl AggregateFunc {
    fn prefix(self) -> &'static str {
        match self {
            Self::Count => "_count",
            Self::Avg => "_avg",
            Self::Sum => "_sum",
            Self::Min => "_min",
            Self::Max => "_max",
        }
    }
}

/// Aggregates computed by `aggregate` and per group by `group_by`.
///
/// `count_all` is `COUNT(*)`, `count` counts non-null values of each listed column.
pub struct AggregateSelection<E: EntityTrait> {
    pub count_all: bool,
    pub count: Vec<E::Column>,
    pub avg: Vec<E::Column>,
    pub sum: Vec<E::Column>,
    pub min: Vec<E::Column>,
    pub max: Vec<E::Column>,
}

impl<E: EntityTrait> Default for AggregateSelection<E> {
    fn default() -> Self {
        Self {
            count_all: false,
            count: Vec::new(),
            avg: Vec::new(),
            sum: Vec::new(),
            min: Vec::new(),
            max: Vec::new(),
        }
    }
}

impl<E: EntityTrait> AggregateSelection<E> {
    fn entries(&self) -> Vec<(AggregateFunc, E::Column)> {
        let groups = [
            (AggregateFunc::Count, &self.count),
            (AggregateFunc::Avg, &self.avg),
            (AggregateFunc::Sum, &self.sum),
            (AggregateFunc::Min, &self.min),
            (AggregateFunc::Max, &self.max),
        ];

        groups
            .into_iter()
            .flat_map(|(func, columns)| columns.iter().map(move |column| (func, *column)))
            .collect()
    }

    fn is_empty(&self) -> bool {
        !self.count_all && self.entries().is_empty()
    }

    /// Add one aliased expression per requested aggregate to `select`.
    fn apply(&self, mut select: Select<E>) -> Select<E> {
        if self.count_all {
            select = select.expr_as(Expr::cust("COUNT(*)"), COUNT_ALL_ALIAS);
        }

        for (func, column) in self.entries() {
            select = select.expr_as(aggregate_expr::<E>(func, column), alias(func, column));
        }

        select
    }

    fn read(&self, row: Option<&QueryResult>) -> AggregateResult {
        let mut result = AggregateResult::default();

        if self.count_all {
            result.count_all = Some(as_i64(&read_value(row, COUNT_ALL_ALIAS)).unwrap_or(0));
        }

        for (func, column) in self.entries() {
            let name = column.as_str().to_string();
            let value = read_value(row, &alias(func, column));

            match func {
                AggregateFunc::Count => {
                    result.count.insert(name, as_i64(&value).unwrap_or(0));
                }
                AggregateFunc::Avg => {
                    result.avg.insert(name, value);
                }
                AggregateFunc::Sum => {
                    result.sum.insert(name, value);
                }
                AggregateFunc::Min => {
                    result.min.insert(name, value);
                }
                AggregateFunc::Max => {
                    result.max.insert(name, value);
                }
            }
        }

        result
    }
}

macro_rules! selection_builders {
    ($($field:ident),+) => {
        $(
            pub fn $field(mut self, column: E::Column) -> Self {
                self.selection.$field.push(column);
                self
            }
        )+

        pub fn count_all(mut self) -> Self {
            self.selection.count_all = true;
            self
        }
    };
}

/// Arguments of `aggregate`.
pub struct AggregateArgs<E: EntityTrait> {
    pub filter: Condition,
    pub selection: AggregateSelection<E>,
}

impl<E: EntityTrait> Default for AggregateArgs<E> {
    fn default() -> Self {
        Self {
            filter: Condition::all(),
            selection: AggregateSelection::default(),
        }
    }
}

impl<E: EntityTrait> AggregateArgs<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = self.filter.add(condition);
        self
    }

    selection_builders!(count, avg, sum, min, max);
}

/// Aggregate values keyed by column name.
///
/// Numeric aggregates are kept as JSON values because their representation depends on
/// the backend (Postgres `NUMERIC` sums arrive as strings, SQLite returns floats).
/// [`AggregateResult::sum_of`] and [`AggregateResult::avg_of`] read either form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    #[serde(rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count_all: Option<i64>,
    #[serde(rename = "_countBy", skip_serializing_if = "BTreeMap::is_empty")]
    pub count: BTreeMap<String, i64>,
    #[serde(rename = "_avg", skip_serializing_if = "BTreeMap::is_empty")]
    pub avg: BTreeMap<String, JsonValue>,
    #[serde(rename = "_sum", skip_serializing_if = "BTreeMap::is_empty")]
    pub sum: BTreeMap<String, JsonValue>,
    #[serde(rename = "_min", skip_serializing_if = "BTreeMap::is_empty")]
    pub min: BTreeMap<String, JsonValue>,
    #[serde(rename = "_max", skip_serializing_if = "BTreeMap::is_empty")]
    pub max: BTreeMap<String, JsonValue>,
}

impl AggregateResult {
    pub fn sum_of(&self, column: &str) -> Option<f64> {
        self.sum.get(column).and_then(as_f64)
    }

    pub fn avg_of(&self, column: &str) -> Option<f64> {
        self.avg.get(column).and_then(as_f64)
    }
}

/// Predicate used by [`Having`].
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
}

impl Comparison {
    fn apply(self, expr: Expr) -> SimpleExpr {
        match self {
            Self::Eq(value) => expr.eq(value),
            Self::Ne(value) => expr.ne(value),
            Self::Gt(value) => expr.gt(value),
            Self::Gte(value) => expr.gte(value),
            Self::Lt(value) => expr.lt(value),
            Self::Lte(value) => expr.lte(value),
            Self::In(values) => expr.is_in(values),
        }
    }
}

/// Post-grouping filter of `group_by`.
pub enum Having<E: EntityTrait> {
    /// Compare a grouped column, which must be part of `by`.
    Column { column: E::Column, cmp: Comparison },
    /// Compare an aggregate. `column` may only be omitted for `Count` (`COUNT(*)`).
    Aggregate {
        func: AggregateFunc,
        column: Option<E::Column>,
        cmp: Comparison,
    },
    And(Vec<Having<E>>),
    Or(Vec<Having<E>>),
    Not(Box<Having<E>>),
}

impl<E: EntityTrait> Having<E> {
    fn into_condition(self, by: &[E::Column]) -> Result<Condition, QueryError> {
        let condition = match self {
            Self::Column { column, cmp } => {
                if !contains::<E>(by, column) {
                    return Err(QueryError::Validation(format!(
                        "having references column `{}` which is not part of `by`",
                        column.as_str()
                    )));
                }

                Condition::all().add(cmp.apply(Expr::col((E::default(), column))))
            }
            Self::Aggregate { func, column, cmp } => {
                let expr = match column {
                    Some(column) => aggregate_expr::<E>(func, column),
                    None => count_all_expr(func)?,
                };

                Condition::all().add(cmp.apply(Expr::expr(expr)))
            }
            Self::And(items) => items
                .into_iter()
                .try_fold(Condition::all(), |acc, item| {
                    Ok::<_, QueryError>(acc.add(item.into_condition(by)?))
                })?,
            Self::Or(items) => items
                .into_iter()
                .try_fold(Condition::any(), |acc, item| {
                    Ok::<_, QueryError>(acc.add(item.into_condition(by)?))
                })?,
            Self::Not(item) => item.into_condition(by)?.not(),
        };

        Ok(condition)
    }
}

/// Sort key of `group_by`.
pub enum GroupOrder<E: EntityTrait> {
    /// A grouped column, which must be part of `by`.
    Column(E::Column),
    /// An aggregate, `None` column only valid for `Count`.
    Aggregate(AggregateFunc, Option<E::Column>),
}

/// Arguments of `group_by`.
pub struct GroupByArgs<E: EntityTrait> {
    pub by: Vec<E::Column>,
    pub filter: Condition,
    pub having: Option<Having<E>>,
    pub order_by: Vec<(GroupOrder<E>, super::SortOrder)>,
    pub take: Option<u64>,
    pub skip: Option<u64>,
    pub selection: AggregateSelection<E>,
}

impl<E: EntityTrait> GroupByArgs<E> {
    pub fn new(by: Vec<E::Column>) -> Self {
        Self {
            by,
            filter: Condition::all(),
            having: None,
            order_by: Vec::new(),
            take: None,
            skip: None,
            selection: AggregateSelection::default(),
        }
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = self.filter.add(condition);
        self
    }

    pub fn having(mut self, having: Having<E>) -> Self {
        self.having = Some(having);
        self
    }

    pub fn order_by(mut self, key: GroupOrder<E>, order: super::SortOrder) -> Self {
        self.order_by.push((key, order));
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    selection_builders!(count, avg, sum, min, max);

    /// Build the grouped select, rejecting argument combinations SQL can't express.
    pub(super) fn build(self, select: Select<E>) -> Result<(Select<E>, GroupPlan<E>), QueryError> {
        if self.by.is_empty() {
            return Err(QueryError::Validation(
                "group_by requires at least one column in `by`".to_string(),
            ));
        }

        if (self.take.is_some() || self.skip.is_some()) && self.order_by.is_empty() {
            return Err(QueryError::Validation(
                "group_by with `take` or `skip` requires an `order_by`".to_string(),
            ));
        }

        let mut select = select.select_only().filter(self.filter);

        for column in &self.by {
            select = select.column(*column).group_by(*column);
        }

        select = self.selection.apply(select);

        if let Some(having) = self.having {
            select = select.having(having.into_condition(&self.by)?);
        }

        for (key, order) in self.order_by {
            let expr: SimpleExpr = match key {
                GroupOrder::Column(column) => {
                    if !contains::<E>(&self.by, column) {
                        return Err(QueryError::Validation(format!(
                            "order_by references column `{}` which is not part of `by`",
                            column.as_str()
                        )));
                    }

                    Expr::col((E::default(), column)).into()
                }
                GroupOrder::Aggregate(func, Some(column)) => aggregate_expr::<E>(func, column),
                GroupOrder::Aggregate(func, None) => count_all_expr(func)?,
            };

            select = select.order_by(expr, order.into());
        }

        if let Some(skip) = self.skip {
            select = select.offset(skip);
        }
        if let Some(take) = self.take {
            select = select.limit(take);
        }

        Ok((
            select,
            GroupPlan {
                by: self.by,
                selection: self.selection,
            },
        ))
    }
}

/// What `group_by` needs to read its rows back.
pub(super) struct GroupPlan<E: EntityTrait> {
    by: Vec<E::Column>,
    selection: AggregateSelection<E>,
}

impl<E: EntityTrait> GroupPlan<E> {
    pub(super) fn read(&self, row: &QueryResult) -> GroupRow {
        let key = self
            .by
            .iter()
            .map(|column| {
                let name = column.as_str().to_string();
                let value = read_value(Some(row), &name);
                (name, value)
            })
            .collect();

        GroupRow {
            key,
            aggregates: self.selection.read(Some(row)),
        }
    }
}

/// One group of a `group_by` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// Values of the `by` columns identifying the group.
    pub key: BTreeMap<String, JsonValue>,
    #[serde(flatten)]
    pub aggregates: AggregateResult,
}

/// Run the aggregate part shared with `aggregate` over `select`.
pub(super) fn aggregate_select<E: EntityTrait>(
    select: Select<E>,
    selection: &AggregateSelection<E>,
) -> Result<Select<E>, QueryError> {
    if selection.is_empty() {
        return Err(QueryError::Validation(
            "aggregate requires at least one aggregate to compute".to_string(),
        ));
    }

    Ok(selection.apply(select.select_only()))
}

pub(super) fn read_aggregate<E: EntityTrait>(
    selection: &AggregateSelection<E>,
    row: Option<&QueryResult>,
) -> AggregateResult {
    selection.read(row)
}

fn aggregate_expr<E: EntityTrait>(func: AggregateFunc, column: E::Column) -> SimpleExpr {
    let expr = Expr::col((E::default(), column));

    match func {
        AggregateFunc::Count => Func::count(expr).into(),
        AggregateFunc::Avg => Func::avg(expr).into(),
        AggregateFunc::Sum => Func::sum(expr).into(),
        AggregateFunc::Min => Func::min(expr).into(),
        AggregateFunc::Max => Func::max(expr).into(),
    }
}

fn count_all_expr(func: AggregateFunc) -> Result<SimpleExpr, QueryError> {
    match func {
        AggregateFunc::Count => Ok(Expr::cust("COUNT(*)")),
        other => Err(QueryError::Validation(format!(
            "{} requires a column",
            other.prefix()
        ))),
    }
}

fn alias<C: IdenStatic>(func: AggregateFunc, column: C) -> String {
    format!("{}_{}", func.prefix(), column.as_str())
}

fn contains<E: EntityTrait>(columns: &[E::Column], column: E::Column) -> bool {
    columns
        .iter()
        .any(|candidate| candidate.as_str() == column.as_str())
}

/// Decode a result column into JSON without knowing its SQL type up front.
///
/// Computed columns have no declared type, so the candidates are tried from the most
/// to the least specific. A missing row or column and SQL `NULL` all read as `Null`.
fn read_value(row: Option<&QueryResult>, column: &str) -> JsonValue {
    let Some(row) = row else {
        return JsonValue::Null;
    };

    macro_rules! try_decode {
        ($ty:ty, $into:expr) => {
            match row.try_get::<Option<$ty>>("", column) {
                Ok(Some(value)) => return $into(value),
                Ok(None) => return JsonValue::Null,
                Err(_) => {}
            }
        };
    }

    try_decode!(i64, |v: i64| JsonValue::from(v));
    try_decode!(i32, |v: i32| JsonValue::from(v));
    try_decode!(f64, |v: f64| JsonValue::from(v));
    try_decode!(Decimal, |v: Decimal| JsonValue::String(v.to_string()));
    try_decode!(bool, |v: bool| JsonValue::from(v));
    try_decode!(NaiveDateTime, |v: NaiveDateTime| JsonValue::String(v.to_string()));
    try_decode!(NaiveDate, |v: NaiveDate| JsonValue::String(v.to_string()));
    try_decode!(String, |v: String| JsonValue::String(v));

    JsonValue::Null
}

fn as_i64(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        JsonValue::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.parse().ok(),
        _ => None,
    }
}
