use sea_orm::{ColumnTrait, Condition, EntityTrait, Iterable, PrimaryKeyToColumn};

/// A value identifying at most one row of `E`.
///
/// Every entity accepts its `i32` primary key. Entities with additional unique columns
/// get a key enum (e.g. [`AcademyKey`]) so a lookup always names exactly one of them.
pub trait UniqueWhere<E: EntityTrait> {
    fn condition(&self) -> Condition;
}

/// First primary key column of `E`.
pub(crate) fn primary_key_column<E: EntityTrait>() -> Option<E::Column> {
    E::PrimaryKey::iter().next().map(|key| key.into_column())
}

impl<E: EntityTrait> UniqueWhere<E> for i32 {
    fn condition(&self) -> Condition {
        match primary_key_column::<E>() {
            Some(column) => Condition::all().add(column.eq(*self)),
            // Matches nothing
            None => Condition::any(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcademyKey {
    Id(i32),
    Email(String),
    LicenseNumber(String),
}

impl UniqueWhere<entity::academy::Entity> for AcademyKey {
    fn condition(&self) -> Condition {
        use entity::academy::Column;

        let expr = match self {
            Self::Id(id) => Column::Id.eq(*id),
            Self::Email(email) => Column::Email.eq(email.as_str()),
            Self::LicenseNumber(number) => Column::LicenseNumber.eq(number.as_str()),
        };

        Condition::all().add(expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionPlanKey {
    Id(i32),
    Name(String),
}

impl UniqueWhere<entity::subscription_plan::Entity> for SubscriptionPlanKey {
    fn condition(&self) -> Condition {
        use entity::subscription_plan::Column;

        let expr = match self {
            Self::Id(id) => Column::Id.eq(*id),
            Self::Name(name) => Column::Name.eq(name.as_str()),
        };

        Condition::all().add(expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentKey {
    Id(i32),
    TransactionId(String),
}

impl UniqueWhere<entity::payment::Entity> for PaymentKey {
    fn condition(&self) -> Condition {
        use entity::payment::Column;

        let expr = match self {
            Self::Id(id) => Column::Id.eq(*id),
            Self::TransactionId(transaction_id) => {
                Column::TransactionId.eq(transaction_id.as_str())
            }
        };

        Condition::all().add(expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminKey {
    Id(i32),
    Email(String),
}

impl UniqueWhere<entity::admin::Entity> for AdminKey {
    fn condition(&self) -> Condition {
        use entity::admin::Column;

        let expr = match self {
            Self::Id(id) => Column::Id.eq(*id),
            Self::Email(email) => Column::Email.eq(email.as_str()),
        };

        Condition::all().add(expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemSettingKey {
    Id(i32),
    Key(String),
}

impl UniqueWhere<entity::system_setting::Entity> for SystemSettingKey {
    fn condition(&self) -> Condition {
        use entity::system_setting::Column;

        let expr = match self {
            Self::Id(id) => Column::Id.eq(*id),
            Self::Key(key) => Column::Key.eq(key.as_str()),
        };

        Condition::all().add(expr)
    }
}
