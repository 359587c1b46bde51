use sea_orm::{ColumnTrait, Condition, EntityTrait, IdenStatic, ModelTrait, Value};

use super::{args::SortOrder, unique::primary_key_column};

/// Ordering actually sent to the database.
///
/// Appends the primary key when it isn't already part of the ordering so pages are
/// stable, and flips every direction when `reversed` (negative `take`).
pub(super) fn effective_order<E: EntityTrait>(
    order_by: &[(E::Column, SortOrder)],
    reversed: bool,
) -> Vec<(E::Column, SortOrder)> {
    let mut order: Vec<(E::Column, SortOrder)> = order_by.to_vec();

    if let Some(pk) = primary_key_column::<E>() {
        if !order.iter().any(|(column, _)| column.as_str() == pk.as_str()) {
            order.push((pk, SortOrder::Asc));
        }
    }

    if reversed {
        for (_, direction) in order.iter_mut() {
            *direction = direction.reverse();
        }
    }

    order
}

/// Rows at or after `cursor` in `order`.
///
/// Expands to `(a > x) OR (a = x AND b > y) OR ... OR (a = x AND b = y ...)`, the last
/// branch keeping the cursor row itself. NULL cursor values never compare equal, rows
/// sharing a NULL sort value with the cursor are only reached through later branches.
pub(super) fn keyset_condition<E: EntityTrait>(
    order: &[(E::Column, SortOrder)],
    cursor: &E::Model,
) -> Condition {
    let mut condition = Condition::any();

    for (index, (column, direction)) in order.iter().enumerate() {
        let mut branch = Condition::all();
        for (previous, _) in &order[..index] {
            branch = branch.add(previous.eq(cursor.get(*previous)));
        }

        let value = cursor.get(*column);
        branch = branch.add(match direction {
            SortOrder::Asc => column.gt(value),
            SortOrder::Desc => column.lt(value),
        });

        condition = condition.add(branch);
    }

    let mut at_cursor = Condition::all();
    for (column, _) in order {
        at_cursor = at_cursor.add(column.eq(cursor.get(*column)));
    }

    condition.add(at_cursor)
}

/// Keep the first model of each distinct combination of `columns`, preserving order.
pub(super) fn distinct_by<E: EntityTrait>(
    models: Vec<E::Model>,
    columns: &[E::Column],
) -> Vec<E::Model> {
    let mut seen: Vec<Vec<Value>> = Vec::new();

    models
        .into_iter()
        .filter(|model| {
            let key: Vec<Value> = columns.iter().map(|column| model.get(*column)).collect();
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        })
        .collect()
}

/// Apply `skip` then `take` (by absolute value) to an in-memory page.
pub(super) fn window<T>(rows: Vec<T>, skip: Option<u64>, take: Option<i64>) -> Vec<T> {
    let skip = skip.unwrap_or(0) as usize;
    let iter = rows.into_iter().skip(skip);

    match take {
        Some(take) => iter.take(take.unsigned_abs() as usize).collect(),
        None => iter.collect(),
    }
}
