use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
    pub position: Option<String>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    pub preferred_foot: Option<String>,
    pub current_club: Option<String>,
    pub training_start_date: Option<NaiveDate>,
    pub training_end_date: Option<NaiveDate>,
}
