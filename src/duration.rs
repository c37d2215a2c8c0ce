//! Duration literals.
//!
//! PromQL writes time spans as a descending sequence of unit quantities, for
//! example `5m`, `1h30m` or `2w3d`. This module resolves such literals into a
//! signed millisecond [`Duration`] and formats durations back into the same
//! compact notation.
//!
//! # Examples
//!
//! ```
//! use promql_ast::duration::{format_duration, parse_duration, Duration};
//!
//! let d = parse_duration("1h30m").unwrap();
//! assert_eq!(d, Duration::from_mins(90));
//! assert_eq!(format_duration(d), "1h30m");
//! assert!(parse_duration("soon").is_err());
//! ```

use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AstError, AstResult};

const MILLIS_PER_SECOND: i64 = 1000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
const MILLIS_PER_YEAR: i64 = 365 * MILLIS_PER_DAY;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(([0-9]+)y)?(([0-9]+)w)?(([0-9]+)d)?(([0-9]+)h)?(([0-9]+)m)?(([0-9]+)s)?(([0-9]+)ms)?$",
    )
    .expect("duration pattern compiles")
});

/// Capture group of each unit quantity in [`DURATION_RE`], largest unit first.
const UNIT_GROUPS: [(usize, i64); 7] = [
    (2, MILLIS_PER_YEAR),
    (4, MILLIS_PER_WEEK),
    (6, MILLIS_PER_DAY),
    (8, MILLIS_PER_HOUR),
    (10, MILLIS_PER_MINUTE),
    (12, MILLIS_PER_SECOND),
    (14, 1),
];

/// A signed span of time with millisecond resolution.
///
/// Offsets may be negative (`offset -5m`), so unlike `std::time::Duration`
/// this type carries a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_millis(millis: i64) -> Self {
        Duration(millis)
    }

    // Unit constructors saturate at the largest representable span.
    pub const fn from_secs(secs: i64) -> Self {
        Duration(secs.saturating_mul(MILLIS_PER_SECOND))
    }

    pub const fn from_mins(mins: i64) -> Self {
        Duration(mins.saturating_mul(MILLIS_PER_MINUTE))
    }

    pub const fn from_hours(hours: i64) -> Self {
        Duration(hours.saturating_mul(MILLIS_PER_HOUR))
    }

    pub const fn from_days(days: i64) -> Self {
        Duration(days.saturating_mul(MILLIS_PER_DAY))
    }

    pub const fn from_weeks(weeks: i64) -> Self {
        Duration(weeks.saturating_mul(MILLIS_PER_WEEK))
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Magnitude of the duration, saturating at the largest representable span.
    pub const fn abs(self) -> Self {
        Duration(self.0.saturating_abs())
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration(self.0.saturating_neg())
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = AstError;

    fn try_from(value: std::time::Duration) -> AstResult<Self> {
        i64::try_from(value.as_millis())
            .map(Duration)
            .map_err(|_| AstError::invalid_duration(&format!("{value:?}"), "duration out of range"))
    }
}

impl FromStr for Duration {
    type Err = AstError;

    fn from_str(s: &str) -> AstResult<Self> {
        parse_duration(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(*self))
    }
}

/// Resolves a duration literal such as `1h30m` into a [`Duration`].
///
/// Units must appear in descending order (`y`, `w`, `d`, `h`, `m`, `s`, `ms`),
/// each at most once. The bare literal `0` is accepted without a unit.
pub fn parse_duration(text: &str) -> AstResult<Duration> {
    match text {
        "0" => return Ok(Duration::ZERO),
        "" => return Err(AstError::invalid_duration(text, "empty duration string")),
        _ => {}
    }

    let captures = DURATION_RE
        .captures(text)
        .ok_or_else(|| AstError::invalid_duration(text, "not a valid duration string"))?;

    let mut total: i64 = 0;
    for (group, millis_per_unit) in UNIT_GROUPS {
        let Some(quantity) = captures.get(group) else {
            continue;
        };
        let millis = quantity
            .as_str()
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_mul(millis_per_unit))
            .and_then(|millis| total.checked_add(millis))
            .ok_or_else(|| AstError::invalid_duration(text, "duration out of range"))?;
        total = millis;
    }

    Ok(Duration(total))
}

/// Formats a duration in the compact unit notation, e.g. `1h30m` or `5d`.
///
/// Years and weeks are only used when they divide the remaining span exactly,
/// so ninety days reads `90d` rather than `12w6d`. Zero formats as `0s`.
pub fn format_duration(duration: Duration) -> String {
    if duration.is_negative() {
        return format!("-{}", format_duration(duration.abs()));
    }

    let mut remaining = duration.as_millis();
    if remaining == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    let units: [(&str, i64, bool); 7] = [
        ("y", MILLIS_PER_YEAR, true),
        ("w", MILLIS_PER_WEEK, true),
        ("d", MILLIS_PER_DAY, false),
        ("h", MILLIS_PER_HOUR, false),
        ("m", MILLIS_PER_MINUTE, false),
        ("s", MILLIS_PER_SECOND, false),
        ("ms", 1, false),
    ];
    for (unit, millis_per_unit, exact) in units {
        if exact && remaining % millis_per_unit != 0 {
            continue;
        }
        let quantity = remaining / millis_per_unit;
        if quantity > 0 {
            out.push_str(&quantity.to_string());
            out.push_str(unit);
            remaining -= quantity * millis_per_unit;
        }
    }
    out
}
