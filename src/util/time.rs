use chrono::{Duration, NaiveDateTime};

use crate::error::Error;

/// Calculates the end of a subscription period.
///
/// # Arguments
/// - `start` - Start of the period
/// - `duration_days` - Length of the plan's billing period in days
///
/// # Returns
/// - `Ok(NaiveDateTime)` - `start` plus `duration_days` days
/// - `Err(Error::InternalError)` - Negative duration or a date outside the supported range
pub fn period_end(start: NaiveDateTime, duration_days: i32) -> Result<NaiveDateTime, Error> {
    if duration_days < 0 {
        return Err(Error::InternalError(format!(
            "Plan duration must not be negative, got {} days",
            duration_days
        )));
    }

    start
        .checked_add_signed(Duration::days(duration_days as i64))
        .ok_or_else(|| {
            Error::InternalError(format!(
                "Subscription period of {} days starting {} is out of range",
                duration_days, start
            ))
        })
}
