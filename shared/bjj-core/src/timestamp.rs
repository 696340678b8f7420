//! `MM:SS` clip timestamps and duration arithmetic

use crate::{CoreError, Result};

/// Parse an `MM:SS` timestamp into seconds.
///
/// The string is split on the first colon and both halves are read as
/// signed integers. Neither half is range-checked, so `"0:70"` is 70
/// seconds and `"90:00"` is an hour and a half.
pub fn parse_timestamp(value: &str) -> Result<i64> {
    let invalid = || CoreError::InvalidTimestamp(value.to_string());

    let (minutes, seconds) = value.split_once(':').ok_or_else(invalid)?;
    let minutes: i64 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: i64 = seconds.trim().parse().map_err(|_| invalid())?;

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)
}

/// Signed clip length in seconds: `end - start`.
///
/// Reversed timestamps give a negative length; nothing is clamped.
pub fn duration_seconds(start: &str, end: &str) -> Result<i64> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;

    end.checked_sub(start)
        .ok_or_else(|| CoreError::InvalidTimestamp(format!("{}-{}", start, end)))
}

/// Render seconds as `M:SS`
pub fn format_timestamp(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    format!("{}{}:{:02}", sign, total / 60, total % 60)
}
