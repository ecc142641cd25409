//! Locale-aware date formatting for page display.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::parse_publish_date;

/// Rendered in place of a date that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Offset between the Buddhist and Gregorian calendars
const BUDDHIST_ERA_OFFSET: i32 = 543;

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Display locale for dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    Thai,
    #[default]
    English,
}

impl Locale {
    /// `th`, `th-TH` and `th_TH` (any case) select Thai; anything else English
    pub fn from_flag(flag: &str) -> Self {
        let flag = flag.trim().to_lowercase();
        if flag == "th" || flag.starts_with("th-") || flag.starts_with("th_") {
            Locale::Thai
        } else {
            Locale::English
        }
    }
}

impl From<&str> for Locale {
    fn from(flag: &str) -> Self {
        Self::from_flag(flag)
    }
}

impl std::str::FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_flag(s))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Thai => write!(f, "th"),
            Locale::English => write!(f, "en"),
        }
    }
}

/// Calendar date as written; timestamps keep their own offset's day
fn calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt.date_naive());
    }
    parse_publish_date(raw).map(|dt| dt.date())
}

/// Long-form date for `locale`.
///
/// English renders as `20 Jun 2023`, Thai as `20 มิถุนายน 2566`
/// (Buddhist era). Unparsable input renders as [`INVALID_DATE`].
pub fn format_date(date: &str, locale: impl Into<Locale>) -> String {
    let Some(day) = calendar_date(date) else {
        return INVALID_DATE.to_string();
    };

    match locale.into() {
        Locale::English => day.format("%-d %b %Y").to_string(),
        Locale::Thai => format!(
            "{} {} {}",
            day.day(),
            THAI_MONTHS[day.month0() as usize],
            day.year() + BUDDHIST_ERA_OFFSET
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_flag() {
        assert_eq!(Locale::from_flag("th"), Locale::Thai);
        assert_eq!(Locale::from_flag("TH"), Locale::Thai);
        assert_eq!(Locale::from_flag("th-TH"), Locale::Thai);
        assert_eq!(Locale::from_flag("en"), Locale::English);
        assert_eq!(Locale::from_flag(""), Locale::English);
        assert_eq!(Locale::from_flag("thai"), Locale::English);
        assert_eq!("th".parse::<Locale>().unwrap(), Locale::Thai);
    }

    #[test]
    fn test_english_format() {
        assert_eq!(format_date("2023-06-20", "en"), "20 Jun 2023");
        assert_eq!(format_date("2023-07-01", Locale::English), "1 Jul 2023");
    }

    #[test]
    fn test_thai_format_uses_buddhist_era() {
        assert_eq!(format_date("2023-06-20", "th"), "20 มิถุนายน 2566");
        assert_eq!(format_date("2024-01-05", Locale::Thai), "5 มกราคม 2567");
    }

    #[test]
    fn test_timestamp_keeps_written_day() {
        assert_eq!(format_date("2023-06-20T01:00:00+07:00", "en"), "20 Jun 2023");
        assert_eq!(format_date("2023-06-20T23:30:00", "en"), "20 Jun 2023");
    }

    #[test]
    fn test_minute_precision_timestamp() {
        assert_eq!(format_date("2023-09-01T10:00", "en"), "1 Sep 2023");
        assert_eq!(format_date("2023-09-01 10:00", "th"), "1 กันยายน 2566");
    }

    #[test]
    fn test_malformed_date_does_not_panic() {
        assert_eq!(format_date("", "th"), INVALID_DATE);
        assert_eq!(format_date("yesterday", "en"), INVALID_DATE);
        assert_eq!(format_date("2023-02-30", "th"), INVALID_DATE);
    }
}
