// Alert engine - decides whether an intimation re-alerts on this render.
//
// Pure transform: callers persist the returned record and play the sound.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::model::{Intimation, Priority};

/// Result of evaluating one intimation against the current instant
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub item: Intimation,
    pub should_alert: bool,
}

/// Maximum repeat alerts per calendar day for a tier.
pub fn ceiling(priority: Priority) -> u32 {
    match priority {
        Priority::High => 3,
        Priority::Medium => 2,
        Priority::Low => 0,
    }
}

/// Ceiling as printed next to the alert counter. Low shows 2 even though it never fires.
pub fn display_ceiling(priority: Priority) -> u32 {
    match priority {
        Priority::High => 3,
        Priority::Medium | Priority::Low => 2,
    }
}

/// Evaluate repeat alerts for `item` at `now`.
///
/// Calendar days for the daily reset are taken in `now`'s time zone. Only
/// records that have never been viewed are considered; the returned record is
/// always marked viewed.
pub fn evaluate<Tz: TimeZone>(item: &Intimation, now: &DateTime<Tz>) -> Evaluation {
    let mut item = item.clone();
    let mut should_alert = false;

    let max_alerts = ceiling(item.priority);
    if item.interval_hours > 0 && !item.has_been_viewed && max_alerts > 0 {
        let now_utc = now.with_timezone(&Utc);

        if let Some(last) = item.last_alert_timestamp {
            let last_day = last.with_timezone(&now.timezone()).date_naive();
            if last_day != now.date_naive() {
                item.alert_count = 0;
            }
        }

        let interval = Duration::hours(i64::from(item.interval_hours));
        let interval_elapsed = item
            .last_alert_timestamp
            .map_or(true, |last| now_utc - last >= interval);

        if item.alert_count < max_alerts && interval_elapsed {
            should_alert = true;
            item.alert_count += 1;
            item.last_alert_timestamp = Some(now_utc);
        }
    }

    item.has_been_viewed = true;

    Evaluation { item, should_alert }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::fixtures::intimation;
    use chrono::FixedOffset;

    fn at(offset_hours: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn repeating(priority: Priority, interval_hours: u32) -> Intimation {
        let mut item = intimation(1, priority, Utc::now() + Duration::days(30));
        item.interval_hours = interval_hours;
        item
    }

    #[test]
    fn test_zero_interval_never_alerts() {
        let now = at(0, 2026, 3, 10, 12);
        let mut item = repeating(Priority::High, 0);
        item.alert_count = 1;
        item.last_alert_timestamp = Some(at(0, 2026, 3, 9, 8).with_timezone(&Utc));

        let result = evaluate(&item, &now);
        assert!(!result.should_alert);
        assert_eq!(result.item.alert_count, 1);
        assert_eq!(result.item.last_alert_timestamp, item.last_alert_timestamp);
        assert!(result.item.has_been_viewed);
    }

    #[test]
    fn test_low_priority_never_alerts() {
        let now = at(0, 2026, 3, 10, 12);
        for interval in [1, 5, 24] {
            let result = evaluate(&repeating(Priority::Low, interval), &now);
            assert!(!result.should_alert);
            assert_eq!(result.item.alert_count, 0);
            assert_eq!(result.item.last_alert_timestamp, None);
        }
    }

    #[test]
    fn test_first_render_alerts() {
        let now = at(0, 2026, 3, 10, 12);
        let result = evaluate(&repeating(Priority::Medium, 4), &now);

        assert!(result.should_alert);
        assert_eq!(result.item.alert_count, 1);
        assert_eq!(result.item.last_alert_timestamp, Some(now.with_timezone(&Utc)));
        assert!(result.item.has_been_viewed);
    }

    #[test]
    fn test_viewed_record_is_not_evaluated() {
        let now = at(0, 2026, 3, 10, 12);
        let mut item = repeating(Priority::High, 1);
        item.has_been_viewed = true;

        let result = evaluate(&item, &now);
        assert!(!result.should_alert);
        assert_eq!(result.item, item);
    }

    #[test]
    fn test_daily_reset_before_increment() {
        let now = at(0, 2026, 3, 10, 9);
        let mut item = repeating(Priority::High, 1);
        item.alert_count = 2;
        item.last_alert_timestamp = Some(at(0, 2026, 3, 9, 23).with_timezone(&Utc));

        let result = evaluate(&item, &now);
        assert!(result.should_alert);
        assert_eq!(result.item.alert_count, 1);
    }

    #[test]
    fn test_daily_reset_uses_local_calendar_day() {
        // 23:00 UTC on the 9th is already the 10th at UTC+2
        let mut item = repeating(Priority::High, 1);
        item.alert_count = 3;
        item.last_alert_timestamp = Some(at(0, 2026, 3, 9, 23).with_timezone(&Utc));

        let same_day = at(2, 2026, 3, 10, 3);
        let result = evaluate(&item, &same_day);
        assert!(!result.should_alert);
        assert_eq!(result.item.alert_count, 3);
    }

    #[test]
    fn test_ceiling_blocks_same_day() {
        let now = at(0, 2026, 3, 10, 20);
        let mut item = repeating(Priority::High, 1);
        item.alert_count = 3;
        item.last_alert_timestamp = Some(at(0, 2026, 3, 10, 8).with_timezone(&Utc));

        let result = evaluate(&item, &now);
        assert!(!result.should_alert);
        assert_eq!(result.item.alert_count, 3);
        assert_eq!(result.item.last_alert_timestamp, item.last_alert_timestamp);
    }

    #[test]
    fn test_interval_not_yet_elapsed() {
        let now = at(0, 2026, 3, 10, 12);
        let mut item = repeating(Priority::Medium, 6);
        item.alert_count = 1;
        item.last_alert_timestamp = Some(at(0, 2026, 3, 10, 8).with_timezone(&Utc));

        let result = evaluate(&item, &now);
        assert!(!result.should_alert);
        assert_eq!(result.item.alert_count, 1);

        let later = at(0, 2026, 3, 10, 14);
        let result = evaluate(&item, &later);
        assert!(result.should_alert);
        assert_eq!(result.item.alert_count, 2);
    }

    #[test]
    fn test_display_ceiling() {
        assert_eq!(display_ceiling(Priority::High), 3);
        assert_eq!(display_ceiling(Priority::Medium), 2);
        assert_eq!(display_ceiling(Priority::Low), 2);
        assert_eq!(ceiling(Priority::Low), 0);
    }
}
