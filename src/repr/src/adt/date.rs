// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `DATE` column type.

use std::sync::LazyLock;

use chrono::NaiveDate;
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};

const FORMAT: &str = "%Y-%m-%d";
/// The pattern cited in error messages.
const PATTERN: &str = "YYYY-MM-DD";
const MIN: &str = "1900-01-01";
const MAX: &str = "9999-12-31";

static MIN_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(1900, 1, 1).expect("known-valid date"));
static MAX_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(9999, 12, 31).expect("known-valid date"));

/// A date column value.
///
/// Values are calendar dates between 1900-01-01 and 9999-12-31, written
/// `YYYY-MM-DD` with zero-padded fields.
#[derive(Debug, Clone)]
pub struct DateValue {
    nullable: bool,
    default: Option<String>,
    value: Option<NaiveDate>,
    catalog: Catalog,
}

impl DateValue {
    /// Creates a date column. A configured default passes through the same
    /// validation as [`DateValue::set_value`].
    pub fn new(
        nullable: bool,
        default: Option<&str>,
        catalog: Catalog,
    ) -> Result<DateValue, TypeError> {
        let mut column = DateValue {
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
    /// The literal must parse and re-render identically, so unpadded fields
    /// and out-of-calendar dates such as `2024-11-31` are format errors.
    /// The range check runs on the parsed date, never on the raw string.
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
                let date = match NaiveDate::parse_from_str(&s, FORMAT) {
                    Ok(date) if date.format(FORMAT).to_string() == s => date,
                    _ => {
                        return Err(
                            self.error(ValueErrorKind::InvalidDateFormat { format: PATTERN })
                        );
                    }
                };
                if date < *MIN_DATE || date > *MAX_DATE {
                    return Err(self.error(ValueErrorKind::DateOutOfRange { min: MIN, max: MAX }));
                }
                self.value = Some(date);
                Ok(())
            }
            Datum::Int(_) | Datum::Float(_) => Err(self.error(ValueErrorKind::MustBeString)),
        }
    }

    /// The stored value, rendered `YYYY-MM-DD`.
    pub fn value(&self) -> Datum {
        match self.value {
            None => Datum::Null,
            Some(date) => Datum::String(date.format(FORMAT).to_string()),
        }
    }

    /// Renders the column definition, e.g. `DATE NOT NULL`.
    pub fn sql_declaration(&self) -> String {
        if self.nullable {
            "DATE NULL".to_string()
        } else {
            "DATE NOT NULL".to_string()
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
