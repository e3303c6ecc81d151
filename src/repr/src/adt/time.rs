// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `TIME` column type.
//!
//! TIME values are signed durations, not clock times: hours run past 23
//! and the whole value may be negative, so this module carries its own
//! parser instead of going through [`chrono`].

use std::fmt;

use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};

/// The pattern cited in error messages.
const PATTERN: &str = "HH:MM:SS";
const MIN: &str = "-838:59:59";
const MAX: &str = "838:59:59";
const MAX_SECONDS: i64 = 838 * 3600 + 59 * 60 + 59;

/// A signed duration in hours, minutes, and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockTime {
    negative: bool,
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl ClockTime {
    /// Parses `[-]H{1,3}:MM:SS` where the rendering must reproduce the
    /// input exactly, so `8:30:00` and `008:30:00` are both rejected in
    /// favor of `08:30:00`. Minutes and seconds top out at 59; hours are
    /// range-checked by the caller, not here.
    fn parse(s: &str) -> Option<ClockTime> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut fields = rest.split(':');
        let hours = fields.next()?;
        let minutes = fields.next()?;
        let seconds = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        if hours.is_empty() || hours.len() > 3 || !hours.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if seconds.len() != 2 || !seconds.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let time = ClockTime {
            negative,
            hours: hours.parse().ok()?,
            minutes: minutes.parse().ok()?,
            seconds: seconds.parse().ok()?,
        };
        if time.minutes > 59 || time.seconds > 59 {
            return None;
        }
        if time.to_string() != s {
            return None;
        }
        Some(time)
    }

    fn total_seconds(&self) -> i64 {
        let magnitude =
            i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{:02}:{:02}:{:02}",
            if self.negative { "-" } else { "" },
            self.hours,
            self.minutes,
            self.seconds
        )
    }
}

/// A time column value.
///
/// Values are signed durations between -838:59:59 and 838:59:59.
#[derive(Debug, Clone)]
pub struct TimeValue {
    nullable: bool,
    default: Option<String>,
    value: Option<ClockTime>,
    catalog: Catalog,
}

impl TimeValue {
    /// Creates a time column. A configured default passes through the same
    /// validation as [`TimeValue::set_value`].
    pub fn new(
        nullable: bool,
        default: Option<&str>,
        catalog: Catalog,
    ) -> Result<TimeValue, TypeError> {
        let mut column = TimeValue {
            nullable,
            default: None,
            value: None,
            catalog,
        };
        if let Some(default) = default {
            column.set_value(Datum::from(default))?;
            column.default = Some(default.to_string());
        }
        Ok(column)
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    /// Validates and stores a value.
    ///
    /// The literal parses first and the range check runs on the parsed
    /// duration, so `839:00:00` is out of range while `12:60:00` is a
    /// format error. A day-roller like `25:00:00` is perfectly valid.
    pub fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        match value {
            Datum::Null => {
                if !self.nullable {
                    return Err(self.error(ValueErrorKind::NullNotAllowed));
                }
                self.value = None;
                Ok(())
            }
            Datum::String(s) => {
                let time = match ClockTime::parse(&s) {
                    Some(time) => time,
                    None => {
                        return Err(
                            self.error(ValueErrorKind::InvalidTimeFormat { format: PATTERN })
                        );
                    }
                };
                if time.total_seconds().abs() > MAX_SECONDS {
                    return Err(self.error(ValueErrorKind::TimeOutOfRange { min: MIN, max: MAX }));
                }
                self.value = Some(time);
                Ok(())
            }
            Datum::Int(_) | Datum::Float(_) => Err(self.error(ValueErrorKind::MustBeString)),
        }
    }

    /// The stored value, rendered with at least two hour digits.
    pub fn value(&self) -> Datum {
        match self.value {
            None => Datum::Null,
            Some(time) => Datum::String(time.to_string()),
        }
    }

    /// Renders the column definition, e.g. `TIME NOT NULL`.
    pub fn sql_declaration(&self) -> String {
        if self.nullable {
            "TIME NULL".to_string()
        } else {
            "TIME NOT NULL".to_string()
        }
    }

    /// The structured representation of the column.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "value": self.value().to_json(),
            "nullable": self.nullable,
            "default": Datum::from(self.default.clone()).to_json(),
        })
    }
}
