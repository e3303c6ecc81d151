// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `DECIMAL` column type: exact fixed-point literals.

use serde::{Deserialize, Serialize};
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};
use crate::strconv;

/// Configuration for a decimal column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalConfig {
    /// Total digit budget.
    pub precision: u8,
    /// Fractional digit budget. The integer part's budget is
    /// `precision - scale`.
    pub scale: u8,
    /// Whether null values are accepted.
    pub nullable: bool,
    /// Initial value, validated and normalized at construction.
    pub default: Option<String>,
}

impl Default for DecimalConfig {
    fn default() -> DecimalConfig {
        DecimalConfig {
            precision: 10,
            scale: 2,
            nullable: false,
            default: None,
        }
    }
}

/// A decimal column value.
///
/// Values are held as validated literals re-rendered at exactly the
/// configured scale. No floating-point representation is involved, so
/// `"0.1"` stays `"0.10"` rather than a binary approximation.
#[derive(Debug, Clone)]
pub struct DecimalValue {
    config: DecimalConfig,
    value: Option<String>,
    catalog: Catalog,
}

impl DecimalValue {
    /// Creates a decimal column. A configured default passes through the
    /// same validation as [`DecimalValue::set_value`] and is stored in its
    /// normalized rendering.
    pub fn new(config: DecimalConfig, catalog: Catalog) -> Result<DecimalValue, TypeError> {
        let mut column = DecimalValue {
            config,
            value: None,
            catalog,
        };
        if let Some(default) = column.config.default.take() {
            column.set_value(Datum::String(default))?;
            column.config.default = column.value.clone();
        }
        Ok(column)
    }

    /// The total digit budget.
    pub fn precision(&self) -> u8 {
        self.config.precision
    }

    /// The fractional digit budget.
    pub fn scale(&self) -> u8 {
        self.config.scale
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    fn integer_budget(&self) -> u32 {
        u32::from(self.config.precision.saturating_sub(self.config.scale))
    }

    /// Validates and stores a value.
    ///
    /// Strings must be plain decimal literals; integers and finite floats
    /// are accepted through their canonical renderings. The integer part is
    /// budgeted on its written digits, sign excluded, and the fractional
    /// part must fit the scale exactly rather than being rounded.
    pub fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        let literal = match value {
            Datum::Null => {
                if !self.config.nullable {
                    return Err(self.error(ValueErrorKind::NullNotAllowed));
                }
                self.value = None;
                return Ok(());
            }
            Datum::Int(v) => v.to_string(),
            Datum::Float(v) if v.is_finite() => v.to_string(),
            Datum::Float(_) => return Err(self.error(ValueErrorKind::MustBeDecimal)),
            Datum::String(s) => s,
        };
        let parts = match strconv::parse_decimal(&literal) {
            Some(parts) => parts,
            None => return Err(self.error(ValueErrorKind::MustBeDecimal)),
        };
        let int_len = u32::try_from(parts.int_digits.len()).unwrap_or(u32::MAX);
        if int_len > self.integer_budget() {
            return Err(self.error(ValueErrorKind::IntegerPartOutOfRange {
                value: literal.trim().to_string(),
                length: self.integer_budget(),
                actual_length: int_len,
            }));
        }
        let frac_len = u32::try_from(parts.frac_digits.len()).unwrap_or(u32::MAX);
        if frac_len > u32::from(self.config.scale) {
            return Err(self.error(ValueErrorKind::DecimalPartOutOfRange {
                value: literal.trim().to_string(),
                length: u32::from(self.config.scale),
                actual_scale: frac_len,
            }));
        }
        self.value = Some(parts.render(self.config.scale));
        Ok(())
    }

    /// The stored value, rendered at the configured scale.
    pub fn value(&self) -> Datum {
        match &self.value {
            None => Datum::Null,
            Some(v) => Datum::String(v.clone()),
        }
    }

    /// Renders the column definition, e.g.
    /// `DECIMAL(10, 2) NOT NULL DEFAULT '1000.50'`.
    pub fn sql_declaration(&self) -> String {
        let mut parts = vec![format!(
            "DECIMAL({}, {})",
            self.config.precision, self.config.scale
        )];
        parts.push(if self.config.nullable { "NULL" } else { "NOT NULL" }.to_string());
        if let Some(default) = &self.config.default {
            parts.push(format!("DEFAULT '{}'", default));
        }
        parts.join(" ")
    }

    /// The structured representation of the column.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "value": Datum::from(self.value.clone()).to_json(),
            "precision": self.config.precision,
            "scale": self.config.scale,
            "nullable": self.config.nullable,
            "default": Datum::from(self.config.default.clone()).to_json(),
        })
    }
}
