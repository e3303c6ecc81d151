// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `TIMESTAMP` column type: seconds since the Unix epoch.

use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};

const MIN: i64 = 0;
const MAX: i64 = 2147483647;

/// A timestamp column value.
///
/// Values are integer epoch seconds between 0 and 2147483647. Only
/// integer datums are accepted; there is no string form.
#[derive(Debug, Clone)]
pub struct TimestampValue {
    nullable: bool,
    default: Option<i64>,
    value: Option<i64>,
    catalog: Catalog,
}

impl TimestampValue {
    /// Creates a timestamp column. A configured default passes through the
    /// same validation as [`TimestampValue::set_value`].
    pub fn new(
        nullable: bool,
        default: Option<i64>,
        catalog: Catalog,
    ) -> Result<TimestampValue, TypeError> {
        let mut column = TimestampValue {
            nullable,
            default: None,
            value: None,
            catalog,
        };
        if let Some(default) = default {
            column.set_value(Datum::Int(default))?;
            column.default = Some(default);
        }
        Ok(column)
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    /// Validates and stores a value.
    pub fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        match value {
            Datum::Null => {
                if !self.nullable {
                    return Err(self.error(ValueErrorKind::NullNotAllowed));
                }
                self.value = None;
                Ok(())
            }
            Datum::Int(v) => {
                if !(MIN..=MAX).contains(&v) {
                    return Err(self.error(ValueErrorKind::TimestampOutOfRange {
                        min: MIN,
                        max: MAX,
                    }));
                }
                self.value = Some(v);
                Ok(())
            }
            Datum::Float(_) | Datum::String(_) => {
                Err(self.error(ValueErrorKind::MustBeInteger))
            }
        }
    }

    /// The stored value.
    pub fn value(&self) -> Datum {
        Datum::from(self.value)
    }

    /// Renders the column definition, e.g. `TIMESTAMP NOT NULL`.
    pub fn sql_declaration(&self) -> String {
        if self.nullable {
            "TIMESTAMP NULL".to_string()
        } else {
            "TIMESTAMP NOT NULL".to_string()
        }
    }

    /// The structured representation of the column.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "value": Datum::from(self.value).to_json(),
            "nullable": self.nullable,
            "default": Datum::from(self.default).to_json(),
        })
    }
}
