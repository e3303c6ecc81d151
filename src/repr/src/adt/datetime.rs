// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `DATETIME` column type.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// The pattern cited in error messages.
const PATTERN: &str = "YYYY-MM-DD HH:MM:SS";
const MIN: &str = "1970-01-01 00:00:00";
const MAX: &str = "9999-12-31 23:59:59";

static MIN_DATETIME: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("known-valid datetime")
});
static MAX_DATETIME: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .expect("known-valid datetime")
});

/// A datetime column value.
///
/// Values are wall-clock instants between 1970-01-01 00:00:00 and
/// 9999-12-31 23:59:59, written `YYYY-MM-DD HH:MM:SS` with zero-padded
/// fields.
#[derive(Debug, Clone)]
pub struct DatetimeValue {
    nullable: bool,
    default: Option<String>,
    value: Option<NaiveDateTime>,
    catalog: Catalog,
}

impl DatetimeValue {
    /// Creates a datetime column. A configured default passes through the
    /// same validation as [`DatetimeValue::set_value`].
    pub fn new(
        nullable: bool,
        default: Option<&str>,
        catalog: Catalog,
    ) -> Result<DatetimeValue, TypeError> {
        let mut column = DatetimeValue {
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

    /// Validates and stores a value. The literal must parse and re-render
    /// identically; the range check runs on the parsed instant.
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
                // chrono admits `:60` as a leap second; those are not valid
                // here, so reject any parse carrying overflow nanoseconds.
                let datetime = match NaiveDateTime::parse_from_str(&s, FORMAT) {
                    Ok(datetime)
                        if datetime.time().nanosecond() < 1_000_000_000
                            && datetime.format(FORMAT).to_string() == s =>
                    {
                        datetime
                    }
                    _ => {
                        return Err(
                            self.error(ValueErrorKind::InvalidDatetimeFormat { format: PATTERN })
                        );
                    }
                };
                if datetime < *MIN_DATETIME || datetime > *MAX_DATETIME {
                    return Err(
                        self.error(ValueErrorKind::DatetimeOutOfRange { min: MIN, max: MAX })
                    );
                }
                self.value = Some(datetime);
                Ok(())
            }
            Datum::Int(_) | Datum::Float(_) => Err(self.error(ValueErrorKind::MustBeString)),
        }
    }

    /// The stored value, rendered `YYYY-MM-DD HH:MM:SS`.
    pub fn value(&self) -> Datum {
        match self.value {
            None => Datum::Null,
            Some(datetime) => Datum::String(datetime.format(FORMAT).to_string()),
        }
    }

    /// Renders the column definition, e.g. `DATETIME NOT NULL`.
    pub fn sql_declaration(&self) -> String {
        if self.nullable {
            "DATETIME NULL".to_string()
        } else {
            "DATETIME NOT NULL".to_string()
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
