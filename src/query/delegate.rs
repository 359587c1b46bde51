use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, Condition,
    ConnectionTrait, EntityTrait, IdenStatic, IntoActiveModel, Iterable, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Related, Select,
};

use crate::error::{query::QueryError, Error};

use super::{
    aggregate::{
        aggregate_select, read_aggregate, AggregateArgs, AggregateResult, GroupByArgs, GroupRow,
    },
    args::FindArgs,
    pagination::{distinct_by, effective_order, keyset_condition, window},
    traits::{DelegateEntity, MutableEntity},
    unique::{primary_key_column, UniqueWhere},
};

/// Operations on one model over a connection or transaction.
///
/// Obtained through the [`Delegates`] accessors, e.g. `db.academy()`. Passing a
/// `DatabaseTransaction` as the connection makes every operation part of that
/// transaction.
pub struct Delegate<'a, C: ConnectionTrait, E: DelegateEntity> {
    db: &'a C,
    entity: PhantomData<E>,
}

impl<'a, C, E> Delegate<'a, C, E>
where
    C: ConnectionTrait,
    E: DelegateEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
{
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    pub async fn find_unique<K: UniqueWhere<E>>(
        &self,
        key: K,
    ) -> Result<Option<E::Model>, Error> {
        Ok(E::find().filter(key.condition()).one(self.db).await?)
    }

    pub async fn find_unique_or_throw<K: UniqueWhere<E>>(
        &self,
        key: K,
    ) -> Result<E::Model, Error> {
        self.find_unique(key).await?.ok_or_else(not_found::<E>)
    }

    pub async fn find_first(&self, args: FindArgs<E>) -> Result<Option<E::Model>, Error> {
        let args = FindArgs {
            take: Some(match args.take {
                Some(take) if take < 0 => -1,
                _ => 1,
            }),
            ..args
        };

        Ok(self.find_many(args).await?.into_iter().next())
    }

    pub async fn find_first_or_throw(&self, args: FindArgs<E>) -> Result<E::Model, Error> {
        self.find_first(args).await?.ok_or_else(not_found::<E>)
    }

    /// Find every row matching `args.filter`, paginated by cursor, skip and take.
    ///
    /// Returns an empty page when `args.cursor` doesn't match any row.
    pub async fn find_many(&self, args: FindArgs<E>) -> Result<Vec<E::Model>, Error> {
        let reversed = matches!(args.take, Some(take) if take < 0);
        let order = effective_order::<E>(&args.order_by, reversed);

        let mut select = E::find().filter(args.filter);

        if let Some(cursor) = args.cursor {
            let Some(cursor_row) = E::find().filter(cursor).one(self.db).await? else {
                return Ok(Vec::new());
            };
            select = select.filter(keyset_condition::<E>(&order, &cursor_row));
        }

        for (column, direction) in &order {
            select = select.order_by(*column, (*direction).into());
        }

        let mut models = if args.distinct.is_empty() {
            if let Some(skip) = args.skip {
                select = select.offset(skip);
            }
            if let Some(take) = args.take {
                select = select.limit(take.unsigned_abs());
            }

            select.all(self.db).await?
        } else {
            let models = distinct_by::<E>(select.all(self.db).await?, &args.distinct);
            window(models, args.skip, args.take)
        };

        if reversed {
            models.reverse();
        }

        Ok(models)
    }

    /// Like [`Delegate::find_many`], loading the related `R` rows of every model.
    pub async fn find_many_including<R>(
        &self,
        args: FindArgs<E>,
    ) -> Result<Vec<(E::Model, Vec<R::Model>)>, Error>
    where
        R: EntityTrait,
        R::Model: Send + Sync,
        E: Related<R>,
    {
        let models = self.find_many(args).await?;
        let related = models.load_many(R::find(), self.db).await?;

        Ok(models.into_iter().zip(related).collect())
    }

    pub async fn create(&self, mut data: E::ActiveModel) -> Result<E::Model, Error> {
        E::stamp(&mut data, Utc::now().naive_utc(), true);

        let model = E::insert(data).exec_with_returning(self.db).await?;

        tracing::trace!(model = E::MODEL_NAME, "created record");

        Ok(model)
    }

    /// Insert `data` in one statement, returning the number of rows written.
    ///
    /// With `skip_duplicates` rows conflicting with a unique constraint are skipped
    /// instead of failing the whole batch. Every model should set the same columns.
    pub async fn create_many(
        &self,
        data: Vec<E::ActiveModel>,
        skip_duplicates: bool,
    ) -> Result<u64, Error> {
        if data.is_empty() {
            return Ok(0);
        }

        let now = Utc::now().naive_utc();
        let data = data.into_iter().map(|mut model| {
            E::stamp(&mut model, now, true);
            model
        });

        let mut insert = E::insert_many(data);
        if skip_duplicates {
            insert = insert.on_conflict(OnConflict::new().do_nothing().to_owned());
        }

        let rows = insert.exec_without_returning(self.db).await?;

        tracing::trace!(model = E::MODEL_NAME, rows, "created records");

        Ok(rows)
    }

    /// Insert `data` and return the created models in input order.
    ///
    /// Rows are inserted one statement at a time; pass a transaction to make the
    /// batch atomic.
    pub async fn create_many_and_return(
        &self,
        data: Vec<E::ActiveModel>,
    ) -> Result<Vec<E::Model>, Error> {
        let mut models = Vec::with_capacity(data.len());

        for model in data {
            models.push(self.create(model).await?);
        }

        Ok(models)
    }

    pub async fn count(&self, args: FindArgs<E>) -> Result<u64, Error> {
        if args.cursor.is_some() || !args.distinct.is_empty() {
            return Ok(self.find_many(args).await?.len() as u64);
        }

        let total = E::find().filter(args.filter).count(self.db).await?;
        let remaining = total.saturating_sub(args.skip.unwrap_or(0));

        Ok(match args.take {
            Some(take) => remaining.min(take.unsigned_abs()),
            None => remaining,
        })
    }

    /// Compute `_count`, `_avg`, `_sum`, `_min` and `_max` over the filtered rows.
    pub async fn aggregate(&self, args: AggregateArgs<E>) -> Result<AggregateResult, Error> {
        let select = aggregate_select(E::find().filter(args.filter), &args.selection)?;
        let row = self
            .db
            .query_one(select.build(self.db.get_database_backend()))
            .await?;

        Ok(read_aggregate(&args.selection, row.as_ref()))
    }

    /// Group the filtered rows by `args.by` and compute the selected aggregates per group.
    pub async fn group_by(&self, args: GroupByArgs<E>) -> Result<Vec<GroupRow>, Error> {
        let (select, plan) = args.build(E::find())?;
        let rows = self
            .db
            .query_all(select.build(self.db.get_database_backend()))
            .await?;

        Ok(rows.iter().map(|row| plan.read(row)).collect())
    }

    fn select_unique<K: UniqueWhere<E>>(key: &K) -> Select<E> {
        E::find().filter(key.condition())
    }
}

impl<'a, C, E> Delegate<'a, C, E>
where
    C: ConnectionTrait,
    E: MutableEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
{
    /// Merge the `Set` fields of `data` into the row identified by `key`.
    ///
    /// Fields left `NotSet` keep their stored value. Primary key fields of `data` are
    /// ignored.
    pub async fn update<K: UniqueWhere<E>>(
        &self,
        key: K,
        data: E::ActiveModel,
    ) -> Result<E::Model, Error> {
        let existing = Self::select_unique(&key)
            .one(self.db)
            .await?
            .ok_or_else(not_found::<E>)?;

        let mut stored = existing.into_active_model();
        for column in E::Column::iter() {
            if is_primary_key::<E>(column) {
                continue;
            }
            if let ActiveValue::Set(value) = data.get(column) {
                stored.set(column, value);
            }
        }
        E::stamp(&mut stored, Utc::now().naive_utc(), false);

        let model = stored.update(self.db).await?;

        tracing::trace!(model = E::MODEL_NAME, "updated record");

        Ok(model)
    }

    /// Apply the `Set` fields of `data` to every row matching `filter`.
    pub async fn update_many(
        &self,
        filter: Condition,
        mut data: E::ActiveModel,
    ) -> Result<u64, Error> {
        E::stamp(&mut data, Utc::now().naive_utc(), false);

        let result = E::update_many().set(data).filter(filter).exec(self.db).await?;

        tracing::trace!(
            model = E::MODEL_NAME,
            rows = result.rows_affected,
            "updated records"
        );

        Ok(result.rows_affected)
    }

    /// Like [`Delegate::update_many`], returning the updated models ordered by primary key.
    ///
    /// The matching rows are selected before the update so models that stop matching
    /// `filter` because of the update are still returned.
    pub async fn update_many_and_return(
        &self,
        filter: Condition,
        data: E::ActiveModel,
    ) -> Result<Vec<E::Model>, Error> {
        let pk = primary_key_column::<E>().ok_or_else(|| {
            Error::InternalError(format!("{} has no primary key", E::MODEL_NAME))
        })?;

        let ids: Vec<sea_orm::Value> = E::find()
            .filter(filter)
            .all(self.db)
            .await?
            .iter()
            .map(|model| model.get(pk))
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.update_many(Condition::all().add(pk.is_in(ids.clone())), data)
            .await?;

        Ok(E::find()
            .filter(pk.is_in(ids))
            .order_by_asc(pk)
            .all(self.db)
            .await?)
    }

    /// Update the row identified by `key` with `update`, or insert `create` when missing.
    ///
    /// Not atomic on its own: run it inside a transaction when concurrent writers may
    /// insert the same key.
    pub async fn upsert<K: UniqueWhere<E>>(
        &self,
        key: K,
        create: E::ActiveModel,
        update: E::ActiveModel,
    ) -> Result<E::Model, Error> {
        if Self::select_unique(&key).one(self.db).await?.is_some() {
            self.update(key, update).await
        } else {
            self.create(create).await
        }
    }

    /// Delete the row identified by `key`, returning it.
    pub async fn delete<K: UniqueWhere<E>>(&self, key: K) -> Result<E::Model, Error> {
        let condition = key.condition();
        let existing = E::find()
            .filter(condition.clone())
            .one(self.db)
            .await?
            .ok_or_else(not_found::<E>)?;

        E::delete_many().filter(condition).exec(self.db).await?;

        tracing::trace!(model = E::MODEL_NAME, "deleted record");

        Ok(existing)
    }

    pub async fn delete_many(&self, filter: Condition) -> Result<u64, Error> {
        let result = E::delete_many().filter(filter).exec(self.db).await?;

        tracing::trace!(
            model = E::MODEL_NAME,
            rows = result.rows_affected,
            "deleted records"
        );

        Ok(result.rows_affected)
    }
}

fn not_found<E: DelegateEntity>() -> Error {
    Error::QueryError(QueryError::NotFound {
        model: E::MODEL_NAME,
    })
}

fn is_primary_key<E: EntityTrait>(column: E::Column) -> bool {
    use sea_orm::PrimaryKeyToColumn;

    E::PrimaryKey::iter().any(|key| key.into_column().as_str() == column.as_str())
}

/// Delegate accessors for any connection or transaction.
pub trait Delegates: ConnectionTrait + Sized {
    fn academy(&self) -> Delegate<'_, Self, entity::academy::Entity> {
        Delegate::new(self)
    }

    fn player(&self) -> Delegate<'_, Self, entity::player::Entity> {
        Delegate::new(self)
    }

    fn subscription_plan(&self) -> Delegate<'_, Self, entity::subscription_plan::Entity> {
        Delegate::new(self)
    }

    fn subscription(&self) -> Delegate<'_, Self, entity::subscription::Entity> {
        Delegate::new(self)
    }

    fn document(&self) -> Delegate<'_, Self, entity::document::Entity> {
        Delegate::new(self)
    }

    fn payment(&self) -> Delegate<'_, Self, entity::payment::Entity> {
        Delegate::new(self)
    }

    fn admin(&self) -> Delegate<'_, Self, entity::admin::Entity> {
        Delegate::new(self)
    }

    fn activity(&self) -> Delegate<'_, Self, entity::activity::Entity> {
        Delegate::new(self)
    }

    fn system_setting(&self) -> Delegate<'_, Self, entity::system_setting::Entity> {
        Delegate::new(self)
    }
}

impl<C: ConnectionTrait> Delegates for C {}
