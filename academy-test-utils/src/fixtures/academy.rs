use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::TEST_PASSWORD_PLACEHOLDER,
    error::TestError,
    model::{AcademyModel, DocumentModel, PlayerModel},
    TestSetup,
};

impl TestSetup {
    pub fn academy<'a>(&'a self) -> AcademyFixtures<'a> {
        AcademyFixtures { setup: self }
    }
}

pub struct AcademyFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> AcademyFixtures<'a> {
    /// Insert an active, unverified academy with no storage used.
    ///
    /// `n` seeds the unique columns: `academy{n}@example.com` and `LIC-{n:05}`.
    pub async fn insert_mock_academy(&self, n: i32) -> Result<AcademyModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Academy::insert(entity::academy::ActiveModel {
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
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an active player born on 2008-01-{n} (clamped to the 28th).
    pub async fn insert_mock_player(
        &self,
        academy_id: i32,
        n: i32,
    ) -> Result<PlayerModel, TestError> {
        let now = Utc::now().naive_utc();
        let day = n.clamp(1, 28) as u32;
        let date_of_birth = NaiveDate::from_ymd_opt(2008, 1, day).unwrap_or_default();

        Ok(
            entity::prelude::Player::insert(entity::player::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                first_name: ActiveValue::Set("Player".to_string()),
                last_name: ActiveValue::Set(format!("{}", n)),
                date_of_birth: ActiveValue::Set(date_of_birth),
                nationality: ActiveValue::Set("Portugal".to_string()),
                position: ActiveValue::Set(Some("Midfielder".to_string())),
                height: ActiveValue::Set(Some(170.0 + n as f64)),
                weight: ActiveValue::Set(Some(60.0)),
                preferred_foot: ActiveValue::Set(Some("Right".to_string())),
                current_club: ActiveValue::Set(None),
                training_start_date: ActiveValue::Set(None),
                training_end_date: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an unverified document row.
    ///
    /// Does not touch the academy's `storage_used` counter.
    pub async fn insert_mock_document(
        &self,
        academy_id: i32,
        player_id: Option<i32>,
        file_size: i64,
    ) -> Result<DocumentModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Document::insert(entity::document::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                player_id: ActiveValue::Set(player_id),
                file_name: ActiveValue::Set("passport.pdf".to_string()),
                original_name: ActiveValue::Set("Passport Scan.pdf".to_string()),
                file_path: ActiveValue::Set(format!("academies/{}/passport.pdf", academy_id)),
                file_size: ActiveValue::Set(file_size),
                mime_type: ActiveValue::Set("application/pdf".to_string()),
                document_type: ActiveValue::Set(
                    entity::sea_orm_active_enums::DocumentType::Passport,
                ),
                description: ActiveValue::Set(None),
                is_verified: ActiveValue::Set(false),
                verified_at: ActiveValue::Set(None),
                verified_by: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
