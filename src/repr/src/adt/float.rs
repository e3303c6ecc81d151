// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `FLOAT` column type: approximate numerics rounded to a fixed number
//! of decimal places.

use serde::{Deserialize, Serialize};
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};
use crate::strconv;

/// Configuration for a float column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatConfig {
    /// Digit budget applied to the literal as written, sign and separator
    /// excluded.
    pub length: u8,
    /// Decimal places stored values are rounded to.
    pub decimal_places: u8,
    /// Whether null values are accepted.
    pub nullable: bool,
    /// Initial value, validated and rounded at construction.
    pub default: Option<f64>,
}

impl Default for FloatConfig {
    fn default() -> FloatConfig {
        FloatConfig {
            length: 10,
            decimal_places: 2,
            nullable: false,
            default: None,
        }
    }
}

/// A float column value.
#[derive(Debug, Clone)]
pub struct FloatValue {
    config: FloatConfig,
    value: Option<f64>,
    catalog: Catalog,
}

impl FloatValue {
    /// Creates a float column. A configured default passes through the same
    /// validation as [`FloatValue::set_value`] and is stored rounded.
    pub fn new(config: FloatConfig, catalog: Catalog) -> Result<FloatValue, TypeError> {
        let mut column = FloatValue {
            config,
            value: None,
            catalog,
        };
        if let Some(default) = column.config.default.take() {
            column.set_value(Datum::Float(default))?;
            column.config.default = column.value;
        }
        Ok(column)
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    /// Validates and stores a value.
    ///
    /// Strings parse as floats; integers are accepted as-is. The digit
    /// budget counts the digits of the literal before rounding, so
    /// `"1.23456"` needs a budget of six even under two decimal places.
    /// Non-finite values are rejected.
    pub fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        let (literal, parsed) = match value {
            Datum::Null => {
                if !self.config.nullable {
                    return Err(self.error(ValueErrorKind::NullNotAllowed));
                }
                self.value = None;
                return Ok(());
            }
            Datum::Int(v) => (v.to_string(), v as f64),
            Datum::Float(v) if v.is_finite() => (v.to_string(), v),
            Datum::Float(_) => return Err(self.error(ValueErrorKind::MustBeFloat)),
            Datum::String(s) => {
                let trimmed = s.trim().to_string();
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => (trimmed, v),
                    _ => return Err(self.error(ValueErrorKind::MustBeFloat)),
                }
            }
        };
        let length = u32::from(self.config.length);
        if strconv::numeric_digit_count(&literal) > length {
            return Err(self.error(ValueErrorKind::TooLong {
                value: literal,
                length,
            }));
        }
        self.value = Some(strconv::round_to_places(parsed, self.config.decimal_places));
        Ok(())
    }

    /// The stored value, already rounded.
    pub fn value(&self) -> Datum {
        Datum::from(self.value)
    }

    /// Renders the column definition, e.g. `FLOAT(10, 2) NOT NULL DEFAULT 45.67`.
    pub fn sql_declaration(&self) -> String {
        let mut parts = vec![format!(
            "FLOAT({}, {})",
            self.config.length, self.config.decimal_places
        )];
        parts.push(if self.config.nullable { "NULL" } else { "NOT NULL" }.to_string());
        if let Some(default) = self.config.default {
            parts.push(format!("DEFAULT {}", default));
        }
        parts.join(" ")
    }

    /// The structured representation of the column.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "value": Datum::from(self.value).to_json(),
            "length": self.config.length,
            "decimal_places": self.config.decimal_places,
            "nullable": self.config.nullable,
            "default": Datum::from(self.config.default).to_json(),
        })
    }
}
