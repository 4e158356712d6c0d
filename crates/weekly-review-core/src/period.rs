//! Review period resolution
//!
//! Turns a preset (or an explicit custom range) plus "now" plus an IANA
//! timezone into an absolute `[start, end]` window. Calendar presets are
//! anchored on local midnights computed by [`local_midnight`], which is also
//! what week-start labels and custom date bounds are built on.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, SecondsFormat, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::{ReviewError, Result};

/// Named period-selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodPreset {
    #[default]
    CurrentWeek,
    CurrentMonth,
    Last7Days,
    Last30Days,
    Custom,
}

impl PeriodPreset {
    pub const ALL: [PeriodPreset; 5] = [
        PeriodPreset::CurrentWeek,
        PeriodPreset::CurrentMonth,
        PeriodPreset::Last7Days,
        PeriodPreset::Last30Days,
        PeriodPreset::Custom,
    ];

    /// Enum tag as written to configs and note headers
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodPreset::CurrentWeek => "current_week",
            PeriodPreset::CurrentMonth => "current_month",
            PeriodPreset::Last7Days => "last_7_days",
            PeriodPreset::Last30Days => "last_30_days",
            PeriodPreset::Custom => "custom",
        }
    }

    /// Human-readable label embedded in prompts
    pub fn label(&self) -> &'static str {
        match self {
            PeriodPreset::CurrentWeek => "Current week",
            PeriodPreset::CurrentMonth => "Current month",
            PeriodPreset::Last7Days => "Last 7 days",
            PeriodPreset::Last30Days => "Last 30 days",
            PeriodPreset::Custom => "Custom range",
        }
    }
}

impl fmt::Display for PeriodPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodPreset {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        PeriodPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<&str> = PeriodPreset::ALL.iter().map(|p| p.as_str()).collect();
                ReviewError::invalid_input(format!(
                    "unknown period preset: {} (expected one of: {})",
                    s,
                    supported.join(", ")
                ))
            })
    }
}

/// Explicit start/end supplied for the `custom` preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A resolved review window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: &'static str,
    pub preset: PeriodPreset,
}

/// Parse an IANA timezone name such as `Europe/Berlin`
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ReviewError::invalid_input(format!("unknown timezone: {}", name)))
}

/// Civil date of `instant` as seen in `tz`
pub fn civil_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// The instant at which `date` begins in `tz`.
///
/// The zone's UTC offset is read at 12:00 UTC of `date` (so DST rules for that
/// day apply) and subtracted from UTC midnight of `date`.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let utc_midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let reference = utc_midnight + Duration::hours(12);
    let offset_seconds = tz
        .offset_from_utc_datetime(&reference.naive_utc())
        .fix()
        .local_minus_utc();
    utc_midnight - Duration::seconds(i64::from(offset_seconds))
}

/// Monday on or before `date`
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Civil date of the Monday starting the week that contains `instant` in `tz`
pub fn week_start_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    monday_of(civil_date(instant, tz))
}

/// ISO-8601 UTC string with millisecond precision (`2025-01-15T13:30:00.000Z`)
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTC calendar date of `instant` as `YYYY-MM-DD`
pub fn utc_date_string(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Resolve a preset into a concrete review period.
pub fn resolve_period(
    preset: PeriodPreset,
    custom_range: Option<CustomRange>,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<ReviewPeriod> {
    let start = match preset {
        PeriodPreset::CurrentWeek => local_midnight(week_start_date(now, tz), tz),
        PeriodPreset::CurrentMonth => {
            let today = civil_date(now, tz);
            let first = today - Duration::days(i64::from(today.day0()));
            local_midnight(first, tz)
        }
        PeriodPreset::Last7Days => now - Duration::days(7),
        PeriodPreset::Last30Days => now - Duration::days(30),
        PeriodPreset::Custom => {
            let Some(range) = custom_range else {
                bail_invalid!("custom range is required when preset is 'custom'");
            };
            return Ok(ReviewPeriod {
                start: range.start,
                end: range.end,
                label: preset.label(),
                preset,
            });
        }
    };

    Ok(ReviewPeriod {
        start,
        end: now,
        label: preset.label(),
        preset,
    })
}

/// Which end of a custom range a user-entered bound describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parse a user-entered custom range bound.
///
/// RFC 3339 instants are taken as-is. A bare `YYYY-MM-DD` civil date covers the
/// whole local day: a start bound is that day's local midnight, an end bound is
/// one millisecond before the following local midnight.
pub fn parse_custom_bound(input: &str, tz: Tz, bound: Bound) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        ReviewError::invalid_input(format!(
            "invalid date: {} (expected YYYY-MM-DD or an RFC 3339 timestamp)",
            input
        ))
    })?;

    match bound {
        Bound::Start => Ok(local_midnight(date, tz)),
        Bound::End => {
            let next = date
                .succ_opt()
                .ok_or_else(|| ReviewError::invalid_input(format!("date out of range: {}", input)))?;
            Ok(local_midnight(next, tz) - Duration::milliseconds(1))
        }
    }
}

/// The finalized result of the period selection dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodChoice {
    pub preset: PeriodPreset,
    pub custom_range: Option<CustomRange>,
    pub save_as_default: bool,
}

impl PeriodChoice {
    /// Build a choice from raw dialog inputs.
    ///
    /// Custom presets need both bounds and `start <= end`; bounds given with a
    /// non-custom preset are rejected rather than silently ignored.
    pub fn from_inputs(
        preset: PeriodPreset,
        start: Option<&str>,
        end: Option<&str>,
        tz: Tz,
        save_as_default: bool,
    ) -> Result<Self> {
        let custom_range = match (preset, start, end) {
            (PeriodPreset::Custom, Some(start), Some(end)) => {
                let start = parse_custom_bound(start, tz, Bound::Start)?;
                let end = parse_custom_bound(end, tz, Bound::End)?;
                if start > end {
                    bail_invalid!("custom range start must not be after its end");
                }
                Some(CustomRange { start, end })
            }
            (PeriodPreset::Custom, _, _) => {
                bail_invalid!("custom range needs both a start and an end date")
            }
            (_, None, None) => None,
            (other, _, _) => {
                bail_invalid!(format!(
                    "start/end dates only apply to the custom preset, not {}",
                    other
                ))
            }
        };

        Ok(PeriodChoice {
            preset,
            custom_range,
            save_as_default,
        })
    }
}
