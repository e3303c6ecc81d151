// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `VARCHAR` column type: sanitized, character-counted strings.

use serde::{Deserialize, Serialize};
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};
use crate::strconv;

/// Configuration for a varchar column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarcharConfig {
    /// Maximum length in characters.
    pub length: u16,
    /// Whether null values are accepted.
    pub nullable: bool,
    /// Renders stored values padded with leading zeros to the length.
    pub zero_fill: bool,
    /// Initial value, validated and sanitized at construction.
    pub default: Option<String>,
}

impl Default for VarcharConfig {
    fn default() -> VarcharConfig {
        VarcharConfig {
            length: 255,
            nullable: false,
            zero_fill: false,
            default: None,
        }
    }
}

/// A varchar column value.
#[derive(Debug, Clone)]
pub struct VarcharValue {
    config: VarcharConfig,
    value: Option<String>,
    catalog: Catalog,
}

impl VarcharValue {
    /// Creates a varchar column. A configured default passes through the
    /// same validation as [`VarcharValue::set_value`] and is stored
    /// sanitized.
    pub fn new(config: VarcharConfig, catalog: Catalog) -> Result<VarcharValue, TypeError> {
        let mut column = VarcharValue {
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

    /// The maximum length in characters.
    pub fn length(&self) -> u16 {
        self.config.length
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    fn check_length(&self, s: &str) -> Result<(), TypeError> {
        if s.chars().count() > usize::from(self.config.length) {
            return Err(self.error(ValueErrorKind::TooLong {
                value: s.to_string(),
                length: u32::from(self.config.length),
            }));
        }
        Ok(())
    }

    /// Validates, sanitizes, and stores a value.
    ///
    /// The length check runs twice: once on the input and again on the
    /// sanitized form, since entity escaping can lengthen the string past
    /// the limit.
    pub fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        match value {
            Datum::Null => {
                if !self.config.nullable {
                    return Err(self.error(ValueErrorKind::NullNotAllowed));
                }
                self.value = None;
                Ok(())
            }
            Datum::String(s) => {
                self.check_length(&s)?;
                let clean = strconv::sanitize(&s);
                self.check_length(&clean)?;
                self.value = Some(clean);
                Ok(())
            }
            Datum::Int(_) | Datum::Float(_) => Err(self.error(ValueErrorKind::MustBeString)),
        }
    }

    /// The stored value.
    ///
    /// With zero fill enabled the value renders padded with leading zeros
    /// to the configured length. Null is never padded.
    pub fn value(&self) -> Datum {
        match &self.value {
            None => Datum::Null,
            Some(v) if self.config.zero_fill => {
                Datum::String(strconv::zero_pad(v, usize::from(self.config.length)))
            }
            Some(v) => Datum::String(v.clone()),
        }
    }

    /// Renders the column definition, e.g. `VARCHAR(255) NOT NULL DEFAULT 'guest'`.
    pub fn sql_declaration(&self) -> String {
        let mut parts = vec![format!("VARCHAR({})", self.config.length)];
        if self.config.zero_fill {
            parts.push("ZEROFILL".to_string());
        }
        parts.push(if self.config.nullable { "NULL" } else { "NOT NULL" }.to_string());
        if let Some(default) = &self.config.default {
            parts.push(format!("DEFAULT '{}'", default));
        }
        parts.join(" ")
    }

    /// The structured representation of the column. The value appears in its
    /// stored form, without zero-fill padding.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "value": Datum::from(self.value.clone()).to_json(),
            "length": self.config.length,
            "default": Datum::from(self.config.default.clone()).to_json(),
            "nullable": self.config.nullable,
            "zero_fill": self.config.zero_fill,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sqlcol_i18n::Locale;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::load(Locale::En).unwrap()
    }

    fn column(config: VarcharConfig) -> VarcharValue {
        VarcharValue::new(config, catalog()).unwrap()
    }

    #[test]
    fn plain_strings_are_stored_unchanged() {
        let mut col = column(VarcharConfig::default());
        col.set_value(Datum::from("hello world")).unwrap();
        assert_eq!(col.value(), Datum::from("hello world"));
    }

    #[test]
    fn markup_is_sanitized() {
        let mut col = column(VarcharConfig::default());
        col.set_value(Datum::from("<script>alert('xss');</script>"))
            .unwrap();
        assert_eq!(col.value(), Datum::from("alert(&#039;xss&#039;);"));
        col.set_value(Datum::from("Tom & \"Jerry\"")).unwrap();
        assert_eq!(col.value(), Datum::from("Tom &amp; &quot;Jerry&quot;"));
    }

    #[test]
    fn non_strings_are_rejected() {
        let mut col = column(VarcharConfig::default());
        for bad in [Datum::Int(1), Datum::Float(1.5)] {
            let err = col.set_value(bad).unwrap_err();
            assert_eq!(err.kind(), &ValueErrorKind::MustBeString);
        }
    }

    #[test]
    fn the_length_is_counted_in_characters() {
        let mut col = column(VarcharConfig {
            length: 5,
            ..Default::default()
        });
        col.set_value(Datum::from("héllo")).unwrap();
        col.set_value(Datum::from("мир")).unwrap();
        let err = col.set_value(Datum::from("владимир")).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::TooLong {
                value: "владимир".to_string(),
                length: 5,
            }
        );
    }

    #[test]
    fn sanitizing_can_push_a_value_over_the_limit() {
        let mut col = column(VarcharConfig {
            length: 6,
            ..Default::default()
        });
        let err = col.set_value(Datum::from("aaaaa'")).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::TooLong {
                value: "aaaaa&#039;".to_string(),
                length: 6,
            }
        );
        assert_eq!(col.value(), Datum::Null);
    }

    #[test]
    fn null_requires_a_nullable_column() {
        let mut col = column(VarcharConfig::default());
        let err = col.set_value(Datum::Null).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::NullNotAllowed);

        let mut col = column(VarcharConfig {
            nullable: true,
            ..Default::default()
        });
        col.set_value(Datum::Null).unwrap();
        assert_eq!(col.value(), Datum::Null);
    }

    #[test]
    fn zero_fill_pads_rendered_values_only() {
        let mut col = column(VarcharConfig {
            length: 6,
            zero_fill: true,
            ..Default::default()
        });
        col.set_value(Datum::from("42")).unwrap();
        assert_eq!(col.value(), Datum::from("000042"));
        assert_eq!(col.snapshot()["value"], serde_json::json!("42"));
    }

    #[test]
    fn defaults_are_sanitized() {
        let col = column(VarcharConfig {
            default: Some("it's".to_string()),
            ..Default::default()
        });
        assert_eq!(col.value(), Datum::from("it&#039;s"));
        assert_eq!(
            col.sql_declaration(),
            "VARCHAR(255) NOT NULL DEFAULT 'it&#039;s'"
        );
    }

    #[test]
    fn declaration_lists_modifiers_in_order() {
        let col = column(VarcharConfig {
            length: 10,
            zero_fill: true,
            nullable: true,
            ..Default::default()
        });
        assert_eq!(col.sql_declaration(), "VARCHAR(10) ZEROFILL NULL");
    }

    proptest! {
        #[test]
        fn stored_values_never_exceed_the_length(s in ".{0,40}") {
            let mut col = column(VarcharConfig { length: 20, ..Default::default() });
            if col.set_value(Datum::from(s)).is_ok() {
                match col.value() {
                    Datum::String(v) => prop_assert!(v.chars().count() <= 20),
                    Datum::Null => {}
                    other => panic!("unexpected datum {other:?}"),
                }
            }
        }
    }
}
