//! # Display Formatting
//!
//! Human-readable rendering of durations, instants and bottle counts.
//! Everything here sits at the presentation boundary; business math never
//! consumes these strings.
//!
//! Report timestamps render in studio-local time. The studio operates in
//! China Standard Time, a fixed UTC+8 offset, which keeps the rendering
//! deterministic regardless of the host timezone.

use chrono::{DateTime, FixedOffset, Utc};

use crate::inventory::gram_to_bottle;

/// Studio-local offset (China Standard Time, no DST).
const CST_OFFSET_SECS: i32 = 8 * 3600;

/// Converts an epoch-ms instant to studio-local time.
///
/// Out-of-range instants clamp to the epoch rather than failing; they can
/// only come from a corrupt document.
fn to_local(timestamp_ms: i64) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(CST_OFFSET_SECS).expect("UTC+8 is a valid offset");
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(&offset)
}

/// Formats a duration as "2小时5分钟" / "5分钟" / "30秒".
///
/// Negative or missing durations render as zero.
pub fn format_duration(duration_ms: i64) -> String {
    let ms = duration_ms.max(0);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;

    if hours > 0 {
        format!("{}小时{}分钟", hours, minutes)
    } else if minutes > 0 {
        format!("{}分钟", minutes)
    } else {
        format!("{}秒", seconds)
    }
}

/// Formats an instant as "2026-08-06 14:30" (studio-local).
pub fn format_date_time(timestamp_ms: i64) -> String {
    to_local(timestamp_ms).format("%Y-%m-%d %H:%M").to_string()
}

/// Formats an instant's business date as "2026-08-06" (studio-local).
pub fn date_string(timestamp_ms: i64) -> String {
    to_local(timestamp_ms).format("%Y-%m-%d").to_string()
}

/// Formats an instant's clock time as "14:30" (studio-local).
pub fn time_string(timestamp_ms: i64) -> String {
    to_local(timestamp_ms).format("%H:%M").to_string()
}

/// Formats a gram amount in bottle terms: "10瓶5克" / "10瓶" / "5克".
pub fn format_bottle_display(gram: i64) -> String {
    let split = gram_to_bottle(gram);
    if split.bottles == 0 {
        format!("{}克", gram)
    } else if split.remaining == 0 {
        format!("{}瓶", split.bottles)
    } else {
        format!("{}瓶{}克", split.bottles, split.remaining)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0秒");
        assert_eq!(format_duration(-5_000), "0秒");
        assert_eq!(format_duration(30_000), "30秒");
        assert_eq!(format_duration(5 * 60_000), "5分钟");
        assert_eq!(format_duration(2 * 3_600_000 + 5 * 60_000), "2小时5分钟");
        // Hours always show minutes, even when zero
        assert_eq!(format_duration(3_600_000), "1小时0分钟");
    }

    #[test]
    fn test_format_date_time_is_studio_local() {
        // 2026-08-06 06:30 UTC = 14:30 in UTC+8
        let ts = Utc
            .with_ymd_and_hms(2026, 8, 6, 6, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_date_time(ts), "2026-08-06 14:30");
        assert_eq!(date_string(ts), "2026-08-06");
        assert_eq!(time_string(ts), "14:30");
    }

    #[test]
    fn test_date_rolls_over_at_studio_midnight() {
        // 17:00 UTC is already the next day in UTC+8
        let ts = Utc
            .with_ymd_and_hms(2026, 8, 6, 17, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(date_string(ts), "2026-08-07");
    }

    #[test]
    fn test_format_bottle_display() {
        assert_eq!(format_bottle_display(5), "5克");
        assert_eq!(format_bottle_display(0), "0克");
        assert_eq!(format_bottle_display(26), "2瓶");
        assert_eq!(format_bottle_display(135), "10瓶5克");
    }
}
