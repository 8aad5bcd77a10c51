//! Time record parsing
//!
//! Lines 2 and 3 of a WERA file form one positional record:
//! `date time timezone location lat lat_dir lon lon_dir type at count unit`.
//! Only the first three fields are used; they are combined into a UTC
//! timestamp.

use crate::constants::TIME_RECORD_FIELDS;
use crate::error::{Result, WeraError};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Date/time layouts accepted for the `date time` fields
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Numeric offsets such as `+0100`, `-05:00` or `UTC+01`
static NUMERIC_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:UTC|GMT)?([+-])(\d{1,2}):?(\d{2})?$").expect("offset pattern is valid")
});

/// Timezone abbreviations and their offsets in hours
const TIMEZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("UT", 0),
    ("Z", 0),
    ("WET", 0),
    ("BST", 1),
    ("CET", 1),
    ("CEST", 2),
    ("EET", 2),
    ("EEST", 3),
    ("AST", -4),
    ("EDT", -4),
    ("EST", -5),
    ("CDT", -5),
    ("CST", -6),
    ("MDT", -6),
    ("MST", -7),
    ("PDT", -7),
    ("PST", -8),
    ("AKDT", -8),
    ("AKST", -9),
    ("HST", -10),
];

/// The positional fields of the time record that are consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRecord {
    pub date: String,
    pub time: String,
    pub timezone: String,
}

impl TimeRecord {
    /// Split lines 2-3 of a file into the time record
    pub fn from_lines(lines: &[&str], path: &Path) -> Result<Self> {
        let tokens: Vec<&str> = lines
            .iter()
            .copied()
            .skip(1)
            .take(2)
            .flat_map(str::split_whitespace)
            .collect();

        if tokens.len() < 3 {
            return Err(WeraError::malformed(
                path,
                format!(
                    "time record has {} fields, expected at least 3 of: {}",
                    tokens.len(),
                    TIME_RECORD_FIELDS.join(" ")
                ),
            ));
        }

        Ok(Self {
            date: tokens[0].to_string(),
            time: tokens[1].to_string(),
            timezone: tokens[2].to_string(),
        })
    }

    /// Combine the fields into a UTC timestamp
    pub fn to_utc(&self, path: &Path) -> Result<DateTime<Utc>> {
        let raw = format!("{} {} {}", self.date, self.time, self.timezone);
        let invalid = |reason: String| WeraError::InvalidTimestamp {
            path: path.to_path_buf(),
            value: raw.clone(),
            reason,
        };

        let offset = parse_timezone(&self.timezone)
            .ok_or_else(|| invalid(format!("unknown timezone '{}'", self.timezone)))?;

        let naive = parse_naive(&self.date, &self.time).ok_or_else(|| {
            invalid("date/time does not match any supported layout".to_string())
        })?;

        let local = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| invalid("ambiguous local time".to_string()))?;

        let utc = local.with_timezone(&Utc);
        debug!("Parsed time record '{}' as {}", raw, utc);
        Ok(utc)
    }
}

fn parse_naive(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date, time);
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&combined, format).ok())
}

/// Resolve a timezone field to a fixed offset
pub fn parse_timezone(value: &str) -> Option<FixedOffset> {
    let upper = value.trim().to_ascii_uppercase();

    if let Some((_, hours)) = TIMEZONE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == upper)
    {
        return FixedOffset::east_opt(hours * 3600);
    }

    let captures = NUMERIC_OFFSET.captures(&upper)?;
    let sign = if &captures[1] == "-" { -1 } else { 1 };
    let hours: i32 = captures[2].parse().ok()?;
    let minutes: i32 = captures
        .get(3)
        .map_or(Ok(0), |m| m.as_str().parse())
        .ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse the time record of a file into a UTC timestamp
pub fn parse_time_record(lines: &[&str], path: &Path) -> Result<DateTime<Utc>> {
    TimeRecord::from_lines(lines, path)?.to_utc(path)
}
