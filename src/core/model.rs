// Intimation record and the enums it carries.
//
// The serialized shape (camelCase keys, ISO-8601 timestamps) is what lives in
// the store slot, so renaming a field here is a storage format change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Priority tier of an intimation. Drives grouping and the repeat-alert ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Self::High, Self::Medium, Self::Low]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Tier name as shown on the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::High => "Critical",
            Self::Medium => "Standard",
            Self::Low => "Info",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(()),
        }
    }
}

/// Calendar unit for the visibility duration of a new intimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Days,
    Months,
    Years,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
            Self::Years => "years",
        }
    }

    /// "Day" for an amount of exactly one, "Days" otherwise.
    pub fn label(&self, amount: i64) -> &'static str {
        match (self, amount == 1) {
            (Self::Days, true) => "Day",
            (Self::Days, false) => "Days",
            (Self::Months, true) => "Month",
            (Self::Months, false) => "Months",
            (Self::Years, true) => "Year",
            (Self::Years, false) => "Years",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" | "day" => Ok(Self::Days),
            "months" | "month" => Ok(Self::Months),
            "years" | "year" => Ok(Self::Years),
            _ => Err(()),
        }
    }
}

/// A user-defined timed notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intimation {
    /// Creation time in milliseconds; unique within the stored list
    pub id: i64,
    pub app_name: String,
    pub sender: String,
    pub description: String,
    pub priority: Priority,
    /// Free-text display hint
    pub alert_time: String,
    /// Hours between repeat alerts; 0 disables them
    pub interval_hours: u32,
    /// Repeat alerts fired today
    pub alert_count: u32,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_alert_timestamp: Option<DateTime<Utc>>,
    pub has_been_viewed: bool,
    pub expiry: DateTime<Utc>,
}

impl Intimation {
    /// Strictly before expiry; there is no grace period.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expiry > now
    }
}

// A timestamp that does not parse is treated as never having alerted.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let now = Utc::now();
        let item = fixtures::intimation(1, Priority::High, now);
        let json = serde_json::to_value(&item).unwrap();

        for key in [
            "id",
            "appName",
            "sender",
            "description",
            "priority",
            "alertTime",
            "intervalHours",
            "alertCount",
            "lastAlertTimestamp",
            "hasBeenViewed",
            "expiry",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["priority"], "high");
        assert!(json["lastAlertTimestamp"].is_null());
    }

    #[test]
    fn test_malformed_last_alert_is_absent() {
        let json = r#"{
            "id": 1, "appName": "A", "sender": "s", "description": "d",
            "priority": "medium", "alertTime": "Immediate", "intervalHours": 2,
            "alertCount": 1, "lastAlertTimestamp": "yesterday-ish",
            "hasBeenViewed": false, "expiry": "2030-01-01T00:00:00.000Z"
        }"#;
        let item: Intimation = serde_json::from_str(json).unwrap();
        assert_eq!(item.last_alert_timestamp, None);
        assert_eq!(item.alert_count, 1);
    }

    #[test]
    fn test_is_active_is_strict() {
        let now = Utc::now();
        let item = fixtures::intimation(1, Priority::Low, now);
        assert!(!item.is_active(now));
        assert!(item.is_active(now - Duration::seconds(1)));
    }

    #[test]
    fn test_unit_grammar() {
        assert_eq!(DurationUnit::Days.label(1), "Day");
        assert_eq!(DurationUnit::Days.label(2), "Days");
        assert_eq!(DurationUnit::Months.label(1), "Month");
        assert_eq!(DurationUnit::Years.label(10), "Years");
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(" High ".parse::<Priority>(), Ok(Priority::High));
        assert!("".parse::<Priority>().is_err());
        assert!("urgent".parse::<Priority>().is_err());
    }
}
