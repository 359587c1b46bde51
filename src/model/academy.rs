use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AcademyDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub license_number: Option<String>,
    pub license_expires_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub is_verified: bool,
    pub storage_used: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::academy::Model> for AcademyDto {
    fn from(model: entity::academy::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            city: model.city,
            country: model.country,
            website: model.website,
            logo_url: model.logo_url,
            license_number: model.license_number,
            license_expires_at: model.license_expires_at,
            is_active: model.is_active,
            is_verified: model.is_verified,
            storage_used: model.storage_used,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Registration form of a new academy. `password` is the plaintext password.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewAcademy {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub license_number: Option<String>,
    pub license_expires_at: Option<NaiveDateTime>,
}
