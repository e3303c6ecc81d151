// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The integer column family: `TINYINT`, `SMALLINT`, `MEDIUMINT`, and `INT`.

use serde::{Deserialize, Serialize};
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};
use crate::strconv;

/// A width preset of the integer family.
///
/// A width fixes the SQL type name, the signed and unsigned bounds, and the
/// display width that applies when the configuration does not override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntWidth {
    name: &'static str,
    min: i64,
    max: i64,
    unsigned_max: i64,
    display_width: u16,
}

impl IntWidth {
    /// The 8-bit `TINYINT` width.
    pub const TINY: IntWidth = IntWidth {
        name: "TINYINT",
        min: -128,
        max: 127,
        unsigned_max: 255,
        display_width: 3,
    };

    /// The 16-bit `SMALLINT` width.
    pub const SMALL: IntWidth = IntWidth {
        name: "SMALLINT",
        min: -32768,
        max: 32767,
        unsigned_max: 65535,
        display_width: 5,
    };

    /// The 24-bit `MEDIUMINT` width.
    pub const MEDIUM: IntWidth = IntWidth {
        name: "MEDIUMINT",
        min: -8388608,
        max: 8388607,
        unsigned_max: 16777215,
        display_width: 8,
    };

    /// The 32-bit `INT` width.
    pub const INT: IntWidth = IntWidth {
        name: "INT",
        min: -2147483648,
        max: 2147483647,
        unsigned_max: 4294967295,
        display_width: 11,
    };

    /// The SQL type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The inclusive signed bounds.
    pub fn signed_range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    /// The inclusive unsigned upper bound.
    pub fn unsigned_max(&self) -> i64 {
        self.unsigned_max
    }

    /// The display width that applies when none is configured.
    pub fn display_width(&self) -> u16 {
        self.display_width
    }
}

/// Configuration for an integer column.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntConfig {
    /// Display width override. The width preset's default applies when
    /// `None`.
    pub length: Option<u16>,
    /// Restricts the column to non-negative values and raises the upper
    /// bound accordingly.
    pub unsigned: bool,
    /// Whether null values are accepted.
    pub nullable: bool,
    /// Enables [`IntValue::increment`].
    pub auto_increment: bool,
    /// Renders stored values padded with leading zeros to the display width.
    pub zero_fill: bool,
    /// Initial value, validated at construction.
    pub default: Option<i64>,
}

/// An integer column value.
#[derive(Debug, Clone)]
pub struct IntValue {
    width: IntWidth,
    config: IntConfig,
    value: Option<i64>,
    catalog: Catalog,
}

impl IntValue {
    /// Creates an integer column of the given width. A configured default
    /// passes through the same validation as [`IntValue::set_value`].
    pub fn new(
        width: IntWidth,
        config: IntConfig,
        catalog: Catalog,
    ) -> Result<IntValue, TypeError> {
        let mut column = IntValue {
            width,
            config,
            value: None,
            catalog,
        };
        if let Some(default) = column.config.default {
            column.store(default)?;
        }
        Ok(column)
    }

    /// The width preset this column was created with.
    pub fn width(&self) -> IntWidth {
        self.width
    }

    /// The effective display width.
    pub fn length(&self) -> u16 {
        self.config.length.unwrap_or(self.width.display_width)
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    fn check(&self, v: i64) -> Result<(), TypeError> {
        if self.config.unsigned && v < 0 {
            return Err(self.error(ValueErrorKind::UnsignedNegative));
        }
        let (min, max) = if self.config.unsigned {
            (0, self.width.unsigned_max)
        } else {
            (self.width.min, self.width.max)
        };
        if v < min || v > max {
            return Err(self.error(ValueErrorKind::OutOfRange { value: v, min, max }));
        }
        let length = u32::from(self.length());
        if strconv::digit_count(v) > length {
            return Err(self.error(ValueErrorKind::TooLong {
                value: v.to_string(),
                length,
            }));
        }
        Ok(())
    }

    fn store(&mut self, v: i64) -> Result<(), TypeError> {
        self.check(v)?;
        self.value = Some(v);
        Ok(())
    }

    /// Validates and stores a value.
    ///
    /// Null is accepted only on nullable columns. Strings must be exact
    /// integer renderings; floats are rejected outright rather than
    /// truncated.
    pub fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        match value {
            Datum::Null => {
                if !self.config.nullable {
                    return Err(self.error(ValueErrorKind::NullNotAllowed));
                }
                self.value = None;
                Ok(())
            }
            Datum::Int(v) => self.store(v),
            Datum::String(s) => match strconv::parse_exact_i64(&s) {
                Some(v) => self.store(v),
                None => Err(self.error(ValueErrorKind::MustBeInteger)),
            },
            Datum::Float(_) => Err(self.error(ValueErrorKind::MustBeInteger)),
        }
    }

    /// The stored value.
    ///
    /// With zero fill enabled the value renders as a string padded to the
    /// display width, with any minus sign ahead of the padding. Null is
    /// never padded.
    pub fn value(&self) -> Datum {
        match self.value {
            None => Datum::Null,
            Some(v) if self.config.zero_fill => {
                Datum::String(strconv::zero_pad_int(v, usize::from(self.length())))
            }
            Some(v) => Datum::Int(v),
        }
    }

    /// Advances the stored value by one and returns the new value, treating
    /// an absent value as zero.
    ///
    /// Requires auto increment to be enabled. The new value passes the full
    /// validation that `set_value` applies; on any failure the stored value
    /// is left untouched.
    pub fn increment(&mut self) -> Result<i64, TypeError> {
        if !self.config.auto_increment {
            return Err(self.error(ValueErrorKind::AutoIncrementNotEnabled));
        }
        let current = self.value.unwrap_or(0);
        let next = current
            .checked_add(1)
            .ok_or_else(|| self.error(ValueErrorKind::UnsignedOverflow))?;
        self.store(next)?;
        Ok(next)
    }

    /// Renders the column definition, e.g.
    /// `INT(10) UNSIGNED ZEROFILL AUTO_INCREMENT NOT NULL DEFAULT 1`.
    pub fn sql_declaration(&self) -> String {
        let mut parts = vec![format!("{}({})", self.width.name, self.length())];
        if self.config.unsigned {
            parts.push("UNSIGNED".to_string());
        }
        if self.config.zero_fill {
            parts.push("ZEROFILL".to_string());
        }
        if self.config.auto_increment {
            parts.push("AUTO_INCREMENT".to_string());
        }
        parts.push(if self.config.nullable { "NULL" } else { "NOT NULL" }.to_string());
        if let Some(default) = self.config.default {
            parts.push(format!("DEFAULT {}", default));
        }
        parts.join(" ")
    }

    /// The structured representation of the column. The value appears in its
    /// stored form, without zero-fill padding.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "value": Datum::from(self.value).to_json(),
            "length": self.length(),
            "unsigned": self.config.unsigned,
            "nullable": self.config.nullable,
            "auto_increment": self.config.auto_increment,
            "default": Datum::from(self.config.default).to_json(),
            "zero_fill": self.config.zero_fill,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sqlcol_i18n::Locale;

    use super::*;
    use crate::error::ErrorClass;

    fn catalog() -> Catalog {
        Catalog::load(Locale::En).unwrap()
    }

    fn column(width: IntWidth, config: IntConfig) -> IntValue {
        IntValue::new(width, config, catalog()).unwrap()
    }

    #[test]
    fn accepts_values_within_the_width() {
        let mut col = column(IntWidth::TINY, IntConfig::default());
        col.set_value(Datum::Int(-128)).unwrap();
        assert_eq!(col.value(), Datum::Int(-128));
        col.set_value(Datum::Int(127)).unwrap();
        assert_eq!(col.value(), Datum::Int(127));
    }

    #[test]
    fn rejects_values_outside_the_width() {
        let mut col = column(IntWidth::TINY, IntConfig::default());
        let err = col.set_value(Datum::Int(128)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::OutOfRange {
                value: 128,
                min: -128,
                max: 127
            }
        );
        assert_eq!(err.message(), "Value must be in the range of -128 to 127.");
        assert_eq!(col.value(), Datum::Null);
    }

    #[test]
    fn each_width_has_its_own_bounds() {
        for (width, max) in [
            (IntWidth::TINY, 127),
            (IntWidth::SMALL, 32767),
            (IntWidth::MEDIUM, 8388607),
            (IntWidth::INT, 2147483647),
        ] {
            let mut col = column(width, IntConfig::default());
            col.set_value(Datum::Int(max)).unwrap();
            col.set_value(Datum::Int(-max - 1)).unwrap();
            assert!(col.set_value(Datum::Int(max + 1)).is_err());
            assert!(col.set_value(Datum::Int(-max - 2)).is_err());
        }
    }

    #[test]
    fn unsigned_columns_reject_negatives_and_raise_the_ceiling() {
        let mut col = column(
            IntWidth::TINY,
            IntConfig {
                unsigned: true,
                ..Default::default()
            },
        );
        col.set_value(Datum::Int(255)).unwrap();
        let err = col.set_value(Datum::Int(-1)).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::UnsignedNegative);
        let err = col.set_value(Datum::Int(256)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::OutOfRange {
                value: 256,
                min: 0,
                max: 255
            }
        );
    }

    #[test]
    fn strings_must_be_exact_integer_renderings() {
        let mut col = column(IntWidth::INT, IntConfig::default());
        col.set_value(Datum::from("42")).unwrap();
        assert_eq!(col.value(), Datum::Int(42));
        col.set_value(Datum::from("-7")).unwrap();
        assert_eq!(col.value(), Datum::Int(-7));
        for bad in ["007", "+5", "-0", "1.5", "", "  ", "abc", "1e3"] {
            let err = col.set_value(Datum::from(bad)).unwrap_err();
            assert_eq!(err.kind(), &ValueErrorKind::MustBeInteger, "{bad:?}");
        }
        assert_eq!(col.value(), Datum::Int(-7));
    }

    #[test]
    fn floats_are_never_coerced() {
        let mut col = column(IntWidth::INT, IntConfig::default());
        let err = col.set_value(Datum::Float(1.0)).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::MustBeInteger);
    }

    #[test]
    fn null_requires_a_nullable_column() {
        let mut col = column(IntWidth::INT, IntConfig::default());
        let err = col.set_value(Datum::Null).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::NullNotAllowed);
        assert_eq!(err.message(), "Value cannot be NULL.");

        let mut col = column(
            IntWidth::INT,
            IntConfig {
                nullable: true,
                default: Some(3),
                ..Default::default()
            },
        );
        assert_eq!(col.value(), Datum::Int(3));
        col.set_value(Datum::Null).unwrap();
        assert_eq!(col.value(), Datum::Null);
    }

    #[test]
    fn display_width_bounds_the_digit_count() {
        let mut col = column(
            IntWidth::INT,
            IntConfig {
                length: Some(3),
                ..Default::default()
            },
        );
        col.set_value(Datum::Int(999)).unwrap();
        col.set_value(Datum::Int(-999)).unwrap();
        let err = col.set_value(Datum::Int(1000)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::TooLong {
                value: "1000".to_string(),
                length: 3
            }
        );
        assert_eq!(err.message(), "Value exceeds the allowed length of 3.");
    }

    #[test]
    fn invalid_defaults_fail_construction() {
        let err = IntValue::new(
            IntWidth::TINY,
            IntConfig {
                default: Some(128),
                ..Default::default()
            },
            catalog(),
        )
        .unwrap_err();
        assert_eq!(err.class(), ErrorClass::OutOfRange);
    }

    #[test]
    fn zero_fill_pads_rendered_values_only() {
        let mut col = column(
            IntWidth::INT,
            IntConfig {
                length: Some(5),
                zero_fill: true,
                nullable: true,
                ..Default::default()
            },
        );
        col.set_value(Datum::Int(42)).unwrap();
        assert_eq!(col.value(), Datum::from("00042"));
        col.set_value(Datum::Int(-12)).unwrap();
        assert_eq!(col.value(), Datum::from("-00012"));
        col.set_value(Datum::Int(123456)).unwrap();
        assert_eq!(col.value(), Datum::from("123456"));
        col.set_value(Datum::Null).unwrap();
        assert_eq!(col.value(), Datum::Null);
    }

    #[test]
    fn snapshot_holds_the_unpadded_value() {
        let col = {
            let mut col = column(
                IntWidth::INT,
                IntConfig {
                    length: Some(5),
                    zero_fill: true,
                    ..Default::default()
                },
            );
            col.set_value(Datum::Int(42)).unwrap();
            col
        };
        assert_eq!(
            col.snapshot(),
            serde_json::json!({
                "value": 42,
                "length": 5,
                "unsigned": false,
                "nullable": false,
                "auto_increment": false,
                "default": null,
                "zero_fill": true,
            })
        );
    }

    #[test]
    fn increment_requires_auto_increment() {
        let mut col = column(IntWidth::INT, IntConfig::default());
        let err = col.increment().unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::AutoIncrementNotEnabled);
        assert_eq!(err.class(), ErrorClass::IllegalOperation);
    }

    #[test]
    fn increment_starts_from_zero_and_advances() {
        let mut col = column(
            IntWidth::INT,
            IntConfig {
                auto_increment: true,
                ..Default::default()
            },
        );
        assert_eq!(col.increment().unwrap(), 1);
        assert_eq!(col.increment().unwrap(), 2);
        col.set_value(Datum::Int(41)).unwrap();
        assert_eq!(col.increment().unwrap(), 42);
        assert_eq!(col.value(), Datum::Int(42));
    }

    #[test]
    fn increment_stops_at_the_signed_bound() {
        let mut col = column(
            IntWidth::TINY,
            IntConfig {
                auto_increment: true,
                ..Default::default()
            },
        );
        col.set_value(Datum::Int(127)).unwrap();
        let err = col.increment().unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::OutOfRange {
                value: 128,
                min: -128,
                max: 127
            }
        );
        assert_eq!(col.value(), Datum::Int(127));
    }

    #[test]
    fn increment_stops_at_the_unsigned_bound() {
        let mut col = column(
            IntWidth::TINY,
            IntConfig {
                unsigned: true,
                auto_increment: true,
                ..Default::default()
            },
        );
        col.set_value(Datum::Int(255)).unwrap();
        let err = col.increment().unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::OutOfRange {
                value: 256,
                min: 0,
                max: 255
            }
        );
        assert_eq!(col.value(), Datum::Int(255));
    }

    #[test]
    fn increment_respects_the_display_width() {
        let mut col = column(
            IntWidth::INT,
            IntConfig {
                length: Some(2),
                auto_increment: true,
                ..Default::default()
            },
        );
        col.set_value(Datum::Int(99)).unwrap();
        let err = col.increment().unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::TooLong {
                value: "100".to_string(),
                length: 2
            }
        );
        assert_eq!(col.value(), Datum::Int(99));
    }

    #[test]
    fn declaration_lists_modifiers_in_order() {
        let col = IntValue::new(
            IntWidth::INT,
            IntConfig {
                length: Some(10),
                unsigned: true,
                auto_increment: true,
                zero_fill: true,
                default: Some(1),
                ..Default::default()
            },
            catalog(),
        )
        .unwrap();
        assert_eq!(
            col.sql_declaration(),
            "INT(10) UNSIGNED ZEROFILL AUTO_INCREMENT NOT NULL DEFAULT 1"
        );

        let col = column(
            IntWidth::SMALL,
            IntConfig {
                nullable: true,
                ..Default::default()
            },
        );
        assert_eq!(col.sql_declaration(), "SMALLINT(5) NULL");
    }

    proptest! {
        #[test]
        fn in_range_values_round_trip(v in -128i64..=127) {
            let mut col = column(IntWidth::TINY, IntConfig::default());
            col.set_value(Datum::Int(v)).unwrap();
            prop_assert_eq!(col.value(), Datum::Int(v));
            let mut other = column(IntWidth::TINY, IntConfig::default());
            other.set_value(Datum::from(v.to_string())).unwrap();
            prop_assert_eq!(other.value(), Datum::Int(v));
        }

        #[test]
        fn rejected_values_never_change_the_column(v in proptest::option::of(any::<i64>())) {
            let mut col = column(
                IntWidth::SMALL,
                IntConfig { default: Some(11), ..Default::default() },
            );
            let datum = match v {
                Some(v) => Datum::Int(v),
                None => Datum::Null,
            };
            if col.set_value(datum).is_err() {
                prop_assert_eq!(col.value(), Datum::Int(11));
            }
        }
    }
}
