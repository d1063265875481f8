//! Intake of new intimations: validation, defaults and expiry arithmetic.

use chrono::{DateTime, Datelike, Days, NaiveDate, Offset, TimeZone, Utc};

use super::error::ValidationError;
use super::model::{DurationUnit, Intimation, Priority};

pub const DEFAULT_SENDER: &str = "System Generated";
pub const DEFAULT_DESCRIPTION: &str = "No detailed description provided.";
pub const DEFAULT_ALERT_TIME: &str = "Immediate";

/// Raw, free-text intake fields as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub app_name: String,
    pub sender: String,
    pub description: String,
    /// Empty means the placeholder is still selected
    pub priority: String,
    pub alert_time: String,
    pub interval_hours: String,
    pub duration_value: String,
    pub duration_unit: String,
}

/// A form that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub app_name: String,
    pub sender: String,
    pub description: String,
    pub priority: Priority,
    pub alert_time: String,
    pub interval_hours: u32,
    pub duration: u32,
    pub unit: DurationUnit,
}

/// Check the form; the first failed rule wins.
///
/// Rules in order: application name present, priority selected, duration a
/// positive whole number in a known unit.
pub fn validate(form: &IntakeForm) -> Result<Submission, ValidationError> {
    let app_name = form.app_name.trim();
    if app_name.is_empty() {
        return Err(ValidationError::MissingAppName);
    }

    let priority = form
        .priority
        .parse::<Priority>()
        .map_err(|()| ValidationError::MissingPriority)?;

    let duration = parse_leading_int(&form.duration_value)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(ValidationError::InvalidDuration)?;
    let unit = form
        .duration_unit
        .parse::<DurationUnit>()
        .map_err(|()| ValidationError::InvalidDuration)?;

    // Unparseable or negative intervals disable repeat alerts
    let interval_hours = parse_leading_int(&form.interval_hours)
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0);

    Ok(Submission {
        app_name: app_name.to_string(),
        sender: or_default(&form.sender, DEFAULT_SENDER),
        description: or_default(&form.description, DEFAULT_DESCRIPTION),
        priority,
        // Display hint is kept verbatim
        alert_time: if form.alert_time.is_empty() {
            DEFAULT_ALERT_TIME.to_string()
        } else {
            form.alert_time.clone()
        },
        interval_hours,
        duration,
        unit,
    })
}

impl Submission {
    /// Build the stored record created at `now`.
    pub fn into_intimation<Tz: TimeZone>(
        self,
        id: i64,
        now: &DateTime<Tz>,
    ) -> Result<Intimation, ValidationError> {
        let expiry =
            compute_expiry(now, self.duration, self.unit).ok_or(ValidationError::InvalidDuration)?;

        Ok(Intimation {
            id,
            app_name: self.app_name,
            sender: self.sender,
            description: self.description,
            priority: self.priority,
            alert_time: self.alert_time,
            interval_hours: self.interval_hours,
            alert_count: 0,
            last_alert_timestamp: None,
            has_been_viewed: false,
            expiry,
        })
    }
}

/// Add `amount` calendar units to `now` on `now`'s local calendar.
///
/// Month and year steps keep the day of month and roll surplus days into the
/// following month: Jan 31 + 1 month is Mar 3 (Mar 2 in a leap year), Feb 29
/// + 1 year is Mar 1. Returns `None` if the result leaves chrono's range.
pub fn compute_expiry<Tz: TimeZone>(
    now: &DateTime<Tz>,
    amount: u32,
    unit: DurationUnit,
) -> Option<DateTime<Utc>> {
    let local = now.naive_local();
    let date = local.date();

    let target = match unit {
        DurationUnit::Days => date.checked_add_days(Days::new(u64::from(amount)))?,
        DurationUnit::Months => {
            let months = i64::from(date.month0()) + i64::from(amount);
            let year = i64::from(date.year()) + months.div_euclid(12);
            let month0 = months.rem_euclid(12) as u32;
            rolled_over(i32::try_from(year).ok()?, month0 + 1, date.day())?
        }
        DurationUnit::Years => {
            let year = date.year().checked_add(i32::try_from(amount).ok()?)?;
            rolled_over(year, date.month(), date.day())?
        }
    };

    let naive = target.and_time(local.time());
    let tz = now.timezone();
    let resolved = match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // Wall-clock time skipped by a DST jump: keep the current offset
        None => now
            .offset()
            .fix()
            .from_local_datetime(&naive)
            .single()?
            .with_timezone(&Utc),
    };
    Some(resolved)
}

/// Next id for a record created at `now_ms`, kept above every existing id.
/// `None` once an existing id sits at `i64::MAX`.
pub fn next_id(existing: &[Intimation], now_ms: i64) -> Option<i64> {
    match existing.iter().map(|n| n.id).max() {
        Some(max) if max >= now_ms => max.checked_add(1),
        _ => Some(now_ms),
    }
}

/// Leading-integer parse: optional sign then digits, rest ignored ("12h" is 12).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn rolled_over(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
