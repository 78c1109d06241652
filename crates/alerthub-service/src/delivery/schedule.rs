//! Snooze and reminder time arithmetic.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use alerthub_core::error::AppError;

/// Largest accepted UTC offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// 23:59:59.999 of the local day containing `now`, for a caller whose
/// clock is `utc_offset_minutes` ahead of UTC.
pub fn end_of_local_day(now: DateTime<Utc>, utc_offset_minutes: i32) -> Result<DateTime<Utc>, AppError> {
    if utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(invalid_offset());
    }
    let zone = FixedOffset::east_opt(utc_offset_minutes * 60).ok_or_else(invalid_offset)?;
    let last_moment = now
        .with_timezone(&zone)
        .date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| AppError::internal("Failed to compute end of day"))?;

    zone.from_local_datetime(&last_moment)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| AppError::internal("Ambiguous end of day"))
}

fn invalid_offset() -> AppError {
    AppError::invalid_field(
        "utc_offset_minutes",
        format!("must be between -{MAX_OFFSET_MINUTES} and {MAX_OFFSET_MINUTES}"),
    )
}
