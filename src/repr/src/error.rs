// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The error model shared by all column types.
//!
//! A rejected value produces a [`TypeError`]: a structured
//! [`ValueErrorKind`] paired with a message rendered through the column's
//! [`Catalog`] at construction time. Callers that branch on failures match
//! on the kind or its [`ErrorClass`]; the message text is for humans.

use std::error::Error;
use std::fmt;

use sqlcol_i18n::{Catalog, Params};
use tracing::debug;

/// Broad classification of value errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The input itself is unacceptable: a null where none is allowed, the
    /// wrong kind of datum, a malformed literal, or text the configured
    /// encoding cannot represent.
    InvalidInput,
    /// The input parsed but violates a range or digit budget.
    OutOfRange,
    /// The operation is not available on this column.
    IllegalOperation,
    /// The column configuration itself is invalid.
    InvalidConfig,
}

/// The precise reason a value was rejected.
///
/// Each variant corresponds to one catalog message key; the payload fields
/// are the template parameters for that message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// A null value on a non-nullable column.
    NullNotAllowed,
    /// The datum is not an integer or an exact integer literal.
    MustBeInteger,
    /// The datum is not a string.
    MustBeString,
    /// The datum is not a plain decimal literal.
    MustBeDecimal,
    /// The datum is not numeric.
    MustBeFloat,
    /// A negative value on an unsigned column.
    UnsignedNegative,
    /// Incrementing an unsigned column overflowed its representation.
    UnsignedOverflow,
    /// A numeric value outside the column's range.
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// The inclusive lower bound.
        min: i64,
        /// The inclusive upper bound.
        max: i64,
    },
    /// A value with more digits or characters than the column's length.
    TooLong {
        /// The rejected value, rendered.
        value: String,
        /// The length budget.
        length: u32,
    },
    /// `increment` on a column without auto increment.
    AutoIncrementNotEnabled,
    /// A decimal whose integer part exceeds its digit budget.
    IntegerPartOutOfRange {
        /// The rejected literal.
        value: String,
        /// The integer part's digit budget.
        length: u32,
        /// The observed integer part digit count.
        actual_length: u32,
    },
    /// A decimal whose fractional part exceeds the scale.
    DecimalPartOutOfRange {
        /// The rejected literal.
        value: String,
        /// The scale.
        length: u32,
        /// The observed fractional digit count.
        actual_scale: u32,
    },
    /// Text not representable in the configured encoding.
    InvalidEncoding {
        /// The encoding's name.
        encoding: &'static str,
    },
    /// A configured capacity above the type's hard ceiling.
    LengthExceedsMax {
        /// The hard ceiling in bytes.
        max: u64,
    },
    /// Text whose encoded form exceeds the column's byte capacity.
    TooLongInBytes {
        /// The byte capacity.
        max_length: u64,
        /// The observed encoded length.
        byte_length: u64,
    },
    /// A date literal that does not parse in the expected format.
    InvalidDateFormat {
        /// The human-readable format pattern.
        format: &'static str,
    },
    /// A date outside the supported range.
    DateOutOfRange {
        /// The inclusive lower bound, rendered.
        min: &'static str,
        /// The inclusive upper bound, rendered.
        max: &'static str,
    },
    /// A time literal that does not parse in the expected format.
    InvalidTimeFormat {
        /// The human-readable format pattern.
        format: &'static str,
    },
    /// A time outside the supported range.
    TimeOutOfRange {
        /// The inclusive lower bound, rendered.
        min: &'static str,
        /// The inclusive upper bound, rendered.
        max: &'static str,
    },
    /// A datetime literal that does not parse in the expected format.
    InvalidDatetimeFormat {
        /// The human-readable format pattern.
        format: &'static str,
    },
    /// A datetime outside the supported range.
    DatetimeOutOfRange {
        /// The inclusive lower bound, rendered.
        min: &'static str,
        /// The inclusive upper bound, rendered.
        max: &'static str,
    },
    /// A timestamp outside the supported range.
    TimestampOutOfRange {
        /// The inclusive lower bound.
        min: i64,
        /// The inclusive upper bound.
        max: i64,
    },
    /// A year outside the supported range.
    YearOutOfRange {
        /// The inclusive lower bound.
        min: i64,
        /// The inclusive upper bound.
        max: i64,
    },
}

impl ValueErrorKind {
    /// The stable catalog key for this error.
    pub fn key(&self) -> &'static str {
        match self {
            ValueErrorKind::NullNotAllowed => "NULL_NOT_ALLOWED",
            ValueErrorKind::MustBeInteger => "VALUE_MUST_BE_INTEGER",
            ValueErrorKind::MustBeString => "VALUE_MUST_BE_STRING",
            ValueErrorKind::MustBeDecimal => "VALUE_MUST_BE_DECIMAL",
            ValueErrorKind::MustBeFloat => "VALUE_MUST_BE_FLOAT",
            ValueErrorKind::UnsignedNegative => "UNSIGNED_NEGATIVE",
            ValueErrorKind::UnsignedOverflow => "UNSIGNED_OVERFLOW",
            ValueErrorKind::OutOfRange { .. } => "VALUE_OUT_OF_RANGE",
            ValueErrorKind::TooLong { .. } => "VALUE_TOO_LONG",
            ValueErrorKind::AutoIncrementNotEnabled => "AUTO_INCREMENT_NOT_ENABLED",
            ValueErrorKind::IntegerPartOutOfRange { .. } => "INTEGER_PART_OUT_OF_RANGE",
            ValueErrorKind::DecimalPartOutOfRange { .. } => "DECIMAL_PART_OUT_OF_RANGE",
            ValueErrorKind::InvalidEncoding { .. } => "INVALID_ENCODING",
            ValueErrorKind::LengthExceedsMax { .. } => "LENGTH_EXCEEDS_MAX",
            ValueErrorKind::TooLongInBytes { .. } => "VALUE_TOO_LONG_IN_BYTES",
            ValueErrorKind::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            ValueErrorKind::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
            ValueErrorKind::InvalidTimeFormat { .. } => "INVALID_TIME_FORMAT",
            ValueErrorKind::TimeOutOfRange { .. } => "TIME_OUT_OF_RANGE",
            ValueErrorKind::InvalidDatetimeFormat { .. } => "INVALID_DATETIME_FORMAT",
            ValueErrorKind::DatetimeOutOfRange { .. } => "DATETIME_OUT_OF_RANGE",
            ValueErrorKind::TimestampOutOfRange { .. } => "TIMESTAMP_OUT_OF_RANGE",
            ValueErrorKind::YearOutOfRange { .. } => "YEAR_OUT_OF_RANGE",
        }
    }

    /// The broad class callers should branch on.
    pub fn class(&self) -> ErrorClass {
        match self {
            ValueErrorKind::NullNotAllowed
            | ValueErrorKind::MustBeInteger
            | ValueErrorKind::MustBeString
            | ValueErrorKind::MustBeDecimal
            | ValueErrorKind::MustBeFloat
            | ValueErrorKind::UnsignedNegative
            | ValueErrorKind::InvalidEncoding { .. }
            | ValueErrorKind::InvalidDateFormat { .. }
            | ValueErrorKind::InvalidTimeFormat { .. }
            | ValueErrorKind::InvalidDatetimeFormat { .. } => ErrorClass::InvalidInput,
            ValueErrorKind::UnsignedOverflow
            | ValueErrorKind::OutOfRange { .. }
            | ValueErrorKind::TooLong { .. }
            | ValueErrorKind::IntegerPartOutOfRange { .. }
            | ValueErrorKind::DecimalPartOutOfRange { .. }
            | ValueErrorKind::TooLongInBytes { .. }
            | ValueErrorKind::DateOutOfRange { .. }
            | ValueErrorKind::TimeOutOfRange { .. }
            | ValueErrorKind::DatetimeOutOfRange { .. }
            | ValueErrorKind::TimestampOutOfRange { .. }
            | ValueErrorKind::YearOutOfRange { .. } => ErrorClass::OutOfRange,
            ValueErrorKind::AutoIncrementNotEnabled => ErrorClass::IllegalOperation,
            ValueErrorKind::LengthExceedsMax { .. } => ErrorClass::InvalidConfig,
        }
    }

    /// The template parameters for this error's message.
    pub fn params(&self) -> Params {
        match self {
            ValueErrorKind::NullNotAllowed
            | ValueErrorKind::MustBeInteger
            | ValueErrorKind::MustBeString
            | ValueErrorKind::MustBeDecimal
            | ValueErrorKind::MustBeFloat
            | ValueErrorKind::UnsignedNegative
            | ValueErrorKind::UnsignedOverflow
            | ValueErrorKind::AutoIncrementNotEnabled => Params::new(),
            ValueErrorKind::OutOfRange { value, min, max } => Params::new()
                .with("value", value)
                .with("min", min)
                .with("max", max),
            ValueErrorKind::TooLong { value, length } => {
                Params::new().with("value", value).with("length", length)
            }
            ValueErrorKind::IntegerPartOutOfRange {
                value,
                length,
                actual_length,
            } => Params::new()
                .with("value", value)
                .with("length", length)
                .with("actual_length", actual_length),
            ValueErrorKind::DecimalPartOutOfRange {
                value,
                length,
                actual_scale,
            } => Params::new()
                .with("value", value)
                .with("length", length)
                .with("actual_scale", actual_scale),
            ValueErrorKind::InvalidEncoding { encoding } => {
                Params::new().with("encoding", encoding)
            }
            ValueErrorKind::LengthExceedsMax { max } => Params::new().with("max", max),
            ValueErrorKind::TooLongInBytes {
                max_length,
                byte_length,
            } => Params::new()
                .with("maxLength", max_length)
                .with("byteLength", byte_length),
            ValueErrorKind::InvalidDateFormat { format }
            | ValueErrorKind::InvalidTimeFormat { format }
            | ValueErrorKind::InvalidDatetimeFormat { format } => {
                Params::new().with("format", format)
            }
            ValueErrorKind::DateOutOfRange { min, max }
            | ValueErrorKind::TimeOutOfRange { min, max }
            | ValueErrorKind::DatetimeOutOfRange { min, max } => {
                Params::new().with("min", min).with("max", max)
            }
            ValueErrorKind::TimestampOutOfRange { min, max }
            | ValueErrorKind::YearOutOfRange { min, max } => {
                Params::new().with("min", min).with("max", max)
            }
        }
    }
}

/// An error produced by a column type operation.
///
/// The message is rendered through the column's catalog when the error is
/// constructed, so `Display` is already localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    kind: ValueErrorKind,
    message: String,
}

impl TypeError {
    /// Builds an error for `kind`, rendering its message through `catalog`.
    pub fn new(kind: ValueErrorKind, catalog: &Catalog) -> TypeError {
        let message = catalog.translate(kind.key(), &kind.params());
        debug!(key = kind.key(), %message, "value rejected");
        TypeError { kind, message }
    }

    /// The structured reason for the failure.
    pub fn kind(&self) -> &ValueErrorKind {
        &self.kind
    }

    /// The broad class of the failure.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// The localized message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for TypeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use sqlcol_i18n::Locale;

    use super::*;

    #[test]
    fn localized_messages() {
        let kind = ValueErrorKind::OutOfRange {
            value: 300,
            min: -128,
            max: 127,
        };
        let en = TypeError::new(kind.clone(), &Catalog::load(Locale::En).unwrap());
        assert_eq!(en.to_string(), "Value must be in the range of -128 to 127.");
        let ru = TypeError::new(kind, &Catalog::load(Locale::Ru).unwrap());
        assert_eq!(
            ru.to_string(),
            "Значение должно быть в диапазоне от -128 до 127."
        );
    }

    #[test]
    fn classes() {
        assert_eq!(
            ValueErrorKind::NullNotAllowed.class(),
            ErrorClass::InvalidInput
        );
        assert_eq!(
            ValueErrorKind::TooLong {
                value: "123456".to_string(),
                length: 5
            }
            .class(),
            ErrorClass::OutOfRange
        );
        assert_eq!(
            ValueErrorKind::AutoIncrementNotEnabled.class(),
            ErrorClass::IllegalOperation
        );
        assert_eq!(
            ValueErrorKind::LengthExceedsMax { max: 65535 }.class(),
            ErrorClass::InvalidConfig
        );
    }

    #[test]
    fn every_kind_has_a_message() {
        let catalog = Catalog::load(Locale::En).unwrap();
        let kinds = [
            ValueErrorKind::NullNotAllowed,
            ValueErrorKind::MustBeInteger,
            ValueErrorKind::MustBeString,
            ValueErrorKind::MustBeDecimal,
            ValueErrorKind::MustBeFloat,
            ValueErrorKind::UnsignedNegative,
            ValueErrorKind::UnsignedOverflow,
            ValueErrorKind::OutOfRange {
                value: 0,
                min: 0,
                max: 1,
            },
            ValueErrorKind::TooLong {
                value: String::new(),
                length: 1,
            },
            ValueErrorKind::AutoIncrementNotEnabled,
            ValueErrorKind::IntegerPartOutOfRange {
                value: String::new(),
                length: 1,
                actual_length: 2,
            },
            ValueErrorKind::DecimalPartOutOfRange {
                value: String::new(),
                length: 1,
                actual_scale: 2,
            },
            ValueErrorKind::InvalidEncoding { encoding: "ASCII" },
            ValueErrorKind::LengthExceedsMax { max: 65535 },
            ValueErrorKind::TooLongInBytes {
                max_length: 255,
                byte_length: 256,
            },
            ValueErrorKind::InvalidDateFormat {
                format: "YYYY-MM-DD",
            },
            ValueErrorKind::DateOutOfRange {
                min: "1900-01-01",
                max: "9999-12-31",
            },
            ValueErrorKind::InvalidTimeFormat { format: "HH:MM:SS" },
            ValueErrorKind::TimeOutOfRange {
                min: "-838:59:59",
                max: "838:59:59",
            },
            ValueErrorKind::InvalidDatetimeFormat {
                format: "YYYY-MM-DD HH:MM:SS",
            },
            ValueErrorKind::DatetimeOutOfRange {
                min: "1970-01-01 00:00:00",
                max: "9999-12-31 23:59:59",
            },
            ValueErrorKind::TimestampOutOfRange {
                min: 0,
                max: 2147483647,
            },
            ValueErrorKind::YearOutOfRange {
                min: 1901,
                max: 2155,
            },
        ];
        for kind in kinds {
            assert!(
                catalog.contains(kind.key()),
                "missing catalog entry for {}",
                kind.key()
            );
            let error = TypeError::new(kind, &catalog);
            assert!(
                !error.message().contains('{'),
                "unsubstituted placeholder in {:?}",
                error
            );
        }
    }
}
