
use academy_test_utils::prelude::*;
use sea_orm::{ActiveValue, ColumnTrait, Condition};

use super::*;
use crate::error::{query::QueryError, Error};

/// Academy active model with every required column set, keyed by `n` like the fixtures
fn new_academy(n: i32) -> entity::academy::ActiveModel {
    entity::academy::ActiveModel {
        name: ActiveValue::Set(format!("Academy {}", n)),
        email: ActiveValue::Set(format!("academy{}@example.com", n)),
        password: ActiveValue::Set(TEST_PASSWORD_PLACEHOLDER.to_string()),
        phone: ActiveValue::Set(None),
        address: ActiveValue::Set(None),
        city: ActiveValue::Set(Some("Lisbon".to_string())),
        country: ActiveValue::Set(Some("Portugal".to_string())),
        website: ActiveValue::Set(None),
        logo_url: ActiveValue::Set(None),
        license_number: ActiveValue::Set(Some(format!("LIC-{:05}", n))),
        license_expires_at: ActiveValue::Set(None),
        is_active: ActiveValue::Set(true),
        is_verified: ActiveValue::Set(false),
        storage_used: ActiveValue::Set(0),
        ..Default::default()
    }
}

fn ids<M, F: Fn(&M) -> i32>(models: &[M], id: F) -> Vec<i32> {
    models.iter().map(id).collect()
}
