use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DateError;

static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(\?)?$").unwrap());

/// A calendar date from the dataset, optionally flagged as uncertain.
///
/// Uncertain dates (`YYYY-MM-DD?`) know their month and year but not the day.
/// They still take part in all offset math using the literal day value; only
/// their display text differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateToken {
    pub date: NaiveDate,
    pub uncertain: bool,
}

impl DateToken {
    pub fn exact(date: NaiveDate) -> Self {
        Self {
            date,
            uncertain: false,
        }
    }

    pub fn format_verbose(&self) -> String {
        format_verbose(self.date, self.uncertain)
    }

    pub fn format_short(&self) -> String {
        format_short(self.date, self.uncertain)
    }
}

impl FromStr for DateToken {
    type Err = DateError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        parse_date_token(token)
    }
}

impl TryFrom<String> for DateToken {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_date_token(&value)
    }
}

impl From<DateToken> for String {
    fn from(value: DateToken) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))?;
        if self.uncertain {
            f.write_str("?")?;
        }
        Ok(())
    }
}

pub fn parse_date_token(token: &str) -> Result<DateToken, DateError> {
    let invalid = || DateError::InvalidDateFormat {
        token: token.to_string(),
    };
    let caps = DATE_TOKEN_RE.captures(token).ok_or_else(invalid)?;
    let year: i32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let day: u32 = caps[3].parse().map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    Ok(DateToken {
        date,
        uncertain: caps.get(4).is_some(),
    })
}

/// Signed whole days from `a` to `b`.
pub fn day_difference(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// "Wednesday, January 1, 2025" for exact dates, "June (?) 2025" for
/// uncertain ones. The day is dropped when it is not trustworthy.
pub fn format_verbose(date: NaiveDate, uncertain: bool) -> String {
    if uncertain {
        format!("{} (?) {}", date.format("%B"), date.year())
    } else {
        date.format("%A, %B %-d, %Y").to_string()
    }
}

pub fn format_short(date: NaiveDate, uncertain: bool) -> String {
    if uncertain {
        format!("{} (?) {}", date.format("%b"), date.year())
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shifts by whole months, clamping the day to the target month's length.
/// Returns `None` only when the result leaves chrono's representable range.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Every 1st-of-month in `[start, end]`, in order.
pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut cursor = first_of_month(start);
    if cursor < start {
        let Some(next) = add_months(cursor, 1) else {
            return out;
        };
        cursor = next;
    }
    while cursor <= end {
        out.push(cursor);
        match add_months(cursor, 1) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    out
}
