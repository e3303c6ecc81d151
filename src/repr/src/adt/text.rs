// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The text column family: `TINYTEXT`, `TEXT`, `MEDIUMTEXT`, and
//! `LONGTEXT`, with byte-counted capacities in a configurable encoding.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlcol_i18n::Catalog;

use crate::datum::Datum;
use crate::error::{TypeError, ValueErrorKind};
use crate::strconv;

/// A character encoding a text column can measure its capacity in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-8, the encoded byte length of the string itself.
    #[default]
    Utf8,
    /// ASCII, one byte per character; non-ASCII text is not representable.
    Ascii,
    /// ISO-8859-1, one byte per character up to U+00FF.
    Latin1,
    /// UTF-16, two bytes per code unit, four for supplementary characters.
    Utf16,
}

impl Encoding {
    /// The conventional name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Ascii => "ASCII",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Utf16 => "UTF-16",
        }
    }

    /// The encoded byte length of `s`, or `None` when `s` has no
    /// representation in this encoding.
    pub fn byte_len(&self, s: &str) -> Option<u64> {
        match self {
            Encoding::Utf8 => Some(s.len() as u64),
            Encoding::Ascii => s.is_ascii().then(|| s.len() as u64),
            Encoding::Latin1 => s
                .chars()
                .all(|c| u32::from(c) <= 0xFF)
                .then(|| s.chars().count() as u64),
            Encoding::Utf16 => Some(2 * s.encode_utf16().count() as u64),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The error returned on parsing an unknown encoding name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncodingError(String);

impl fmt::Display for UnknownEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown encoding: {}", self.0)
    }
}

impl Error for UnknownEncodingError {}

impl FromStr for Encoding {
    type Err = UnknownEncodingError;

    fn from_str(s: &str) -> Result<Encoding, UnknownEncodingError> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" => Ok(Encoding::Ascii),
            "iso-8859-1" | "latin1" => Ok(Encoding::Latin1),
            "utf-16" | "utf16" => Ok(Encoding::Utf16),
            _ => Err(UnknownEncodingError(s.to_string())),
        }
    }
}

/// A capacity preset of the text family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextWidth {
    name: &'static str,
    max_bytes: u64,
}

impl TextWidth {
    /// The `TINYTEXT` width, 255 bytes.
    pub const TINY: TextWidth = TextWidth {
        name: "TINYTEXT",
        max_bytes: 255,
    };

    /// The `TEXT` width, 65535 bytes.
    pub const PLAIN: TextWidth = TextWidth {
        name: "TEXT",
        max_bytes: 65535,
    };

    /// The `MEDIUMTEXT` width, 16777215 bytes.
    pub const MEDIUM: TextWidth = TextWidth {
        name: "MEDIUMTEXT",
        max_bytes: 16777215,
    };

    /// The `LONGTEXT` width. Effectively unbounded.
    pub const LONG: TextWidth = TextWidth {
        name: "LONGTEXT",
        max_bytes: 9223372036854775807,
    };

    /// The SQL type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The capacity in encoded bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

/// Configuration for a text column.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Whether null values are accepted.
    pub nullable: bool,
    /// Initial value, validated and sanitized at construction.
    pub default: Option<String>,
    /// The encoding capacity is measured in.
    pub encoding: Encoding,
}

/// A text column value.
#[derive(Debug, Clone)]
pub struct TextValue {
    width: TextWidth,
    max_bytes: u64,
    config: TextConfig,
    value: Option<String>,
    catalog: Catalog,
}

impl TextValue {
    /// Creates a text column with a width preset's capacity.
    pub fn new(
        width: TextWidth,
        config: TextConfig,
        catalog: Catalog,
    ) -> Result<TextValue, TypeError> {
        TextValue::build(width, width.max_bytes, config, catalog)
    }

    /// Creates a plain `TEXT` column with a custom byte capacity.
    ///
    /// The capacity cannot exceed the type's ceiling of 65535 bytes; asking
    /// for more is a configuration error.
    pub fn with_max_length(
        max_bytes: u64,
        config: TextConfig,
        catalog: Catalog,
    ) -> Result<TextValue, TypeError> {
        if max_bytes > TextWidth::PLAIN.max_bytes {
            return Err(TypeError::new(
                ValueErrorKind::LengthExceedsMax {
                    max: TextWidth::PLAIN.max_bytes,
                },
                &catalog,
            ));
        }
        TextValue::build(TextWidth::PLAIN, max_bytes, config, catalog)
    }

    fn build(
        width: TextWidth,
        max_bytes: u64,
        config: TextConfig,
        catalog: Catalog,
    ) -> Result<TextValue, TypeError> {
        let mut column = TextValue {
            width,
            max_bytes,
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

    /// The width preset this column was created with.
    pub fn width(&self) -> TextWidth {
        self.width
    }

    /// The capacity in encoded bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn error(&self, kind: ValueErrorKind) -> TypeError {
        TypeError::new(kind, &self.catalog)
    }

    /// Validates, sanitizes, and stores a value.
    ///
    /// The sanitized form must be representable in the configured encoding,
    /// and its encoded length must fit the capacity.
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
                let clean = strconv::sanitize(&s);
                let byte_length = match self.config.encoding.byte_len(&clean) {
                    Some(len) => len,
                    None => {
                        return Err(self.error(ValueErrorKind::InvalidEncoding {
                            encoding: self.config.encoding.name(),
                        }));
                    }
                };
                if byte_length > self.max_bytes {
                    return Err(self.error(ValueErrorKind::TooLongInBytes {
                        max_length: self.max_bytes,
                        byte_length,
                    }));
                }
                self.value = Some(clean);
                Ok(())
            }
            Datum::Int(_) | Datum::Float(_) => Err(self.error(ValueErrorKind::MustBeString)),
        }
    }

    /// The stored value.
    pub fn value(&self) -> Datum {
        match &self.value {
            None => Datum::Null,
            Some(v) => Datum::String(v.clone()),
        }
    }

    /// Renders the column definition. All widths declare as `TEXT`, e.g.
    /// `TEXT NOT NULL`.
    pub fn sql_declaration(&self) -> String {
        let mut parts = vec!["TEXT".to_string()];
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
            "nullable": self.config.nullable,
            "default": Datum::from(self.config.default.clone()).to_json(),
            "encoding": self.config.encoding.name(),
            "maxLength": self.max_bytes,
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

    fn column(width: TextWidth, config: TextConfig) -> TextValue {
        TextValue::new(width, config, catalog()).unwrap()
    }

    #[test]
    fn encoded_byte_lengths() {
        assert_eq!(Encoding::Utf8.byte_len("héllo"), Some(6));
        assert_eq!(Encoding::Ascii.byte_len("hello"), Some(5));
        assert_eq!(Encoding::Ascii.byte_len("héllo"), None);
        assert_eq!(Encoding::Latin1.byte_len("héllo"), Some(5));
        assert_eq!(Encoding::Latin1.byte_len("мир"), None);
        assert_eq!(Encoding::Utf16.byte_len("hello"), Some(10));
        assert_eq!(Encoding::Utf16.byte_len("мир"), Some(6));
        assert_eq!(Encoding::Utf16.byte_len("😀"), Some(4));
    }

    #[test]
    fn encoding_names_parse_back() {
        for encoding in [
            Encoding::Utf8,
            Encoding::Ascii,
            Encoding::Latin1,
            Encoding::Utf16,
        ] {
            assert_eq!(encoding.name().parse::<Encoding>().unwrap(), encoding);
        }
        assert!("koi8-r".parse::<Encoding>().is_err());
    }

    #[test]
    fn values_are_sanitized_and_stored() {
        let mut col = column(TextWidth::PLAIN, TextConfig::default());
        col.set_value(Datum::from("<script>alert('xss');</script>"))
            .unwrap();
        assert_eq!(col.value(), Datum::from("alert(&#039;xss&#039;);"));
    }

    #[test]
    fn non_strings_are_rejected() {
        let mut col = column(TextWidth::PLAIN, TextConfig::default());
        let err = col.set_value(Datum::Int(5)).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::MustBeString);
    }

    #[test]
    fn unrepresentable_text_is_an_encoding_error() {
        let mut col = column(
            TextWidth::PLAIN,
            TextConfig {
                encoding: Encoding::Ascii,
                ..Default::default()
            },
        );
        col.set_value(Datum::from("plain ascii")).unwrap();
        let err = col.set_value(Datum::from("héllo")).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::InvalidEncoding { encoding: "ASCII" }
        );
        assert_eq!(err.message(), "Invalid encoding: ASCII");
        assert_eq!(err.class(), ErrorClass::InvalidInput);
    }

    #[test]
    fn capacity_is_measured_in_encoded_bytes() {
        let mut col = column(
            TextWidth::TINY,
            TextConfig {
                encoding: Encoding::Utf16,
                ..Default::default()
            },
        );
        // 127 characters encode to 254 bytes; 128 exceed the 255-byte cap.
        col.set_value(Datum::from("a".repeat(127))).unwrap();
        let err = col.set_value(Datum::from("a".repeat(128))).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::TooLongInBytes {
                max_length: 255,
                byte_length: 256,
            }
        );
    }

    #[test]
    fn multibyte_text_counts_its_utf8_bytes() {
        let mut col = column(TextWidth::TINY, TextConfig::default());
        // Cyrillic characters take two bytes each in UTF-8.
        col.set_value(Datum::from("м".repeat(127))).unwrap();
        let err = col.set_value(Datum::from("м".repeat(128))).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValueErrorKind::TooLongInBytes {
                max_length: 255,
                byte_length: 256,
            }
        );
    }

    #[test]
    fn custom_capacities_are_capped() {
        let col =
            TextValue::with_max_length(100, TextConfig::default(), catalog()).unwrap();
        assert_eq!(col.max_bytes(), 100);
        assert_eq!(col.width().name(), "TEXT");

        let err =
            TextValue::with_max_length(65536, TextConfig::default(), catalog()).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::LengthExceedsMax { max: 65535 });
        assert_eq!(err.class(), ErrorClass::InvalidConfig);
        assert_eq!(err.message(), "Length exceeds the maximum length 65535.");
    }

    #[test]
    fn width_presets_set_the_capacity() {
        assert_eq!(
            column(TextWidth::TINY, TextConfig::default()).max_bytes(),
            255
        );
        assert_eq!(
            column(TextWidth::PLAIN, TextConfig::default()).max_bytes(),
            65535
        );
        assert_eq!(
            column(TextWidth::MEDIUM, TextConfig::default()).max_bytes(),
            16777215
        );
        assert!(column(TextWidth::LONG, TextConfig::default()).max_bytes() > u64::from(u32::MAX));
    }

    #[test]
    fn all_widths_declare_as_text() {
        for width in [
            TextWidth::TINY,
            TextWidth::PLAIN,
            TextWidth::MEDIUM,
            TextWidth::LONG,
        ] {
            let col = column(
                width,
                TextConfig {
                    nullable: true,
                    ..Default::default()
                },
            );
            assert_eq!(col.sql_declaration(), "TEXT NULL");
        }
        let col = column(TextWidth::PLAIN, TextConfig::default());
        assert_eq!(col.sql_declaration(), "TEXT NOT NULL");
    }

    #[test]
    fn snapshot_shows_the_encoding_and_capacity() {
        let col = TextValue::new(
            TextWidth::TINY,
            TextConfig {
                nullable: true,
                default: Some("hi".to_string()),
                encoding: Encoding::Latin1,
            },
            catalog(),
        )
        .unwrap();
        assert_eq!(
            col.snapshot(),
            serde_json::json!({
                "value": "hi",
                "nullable": true,
                "default": "hi",
                "encoding": "ISO-8859-1",
                "maxLength": 255,
            })
        );
    }

    #[test]
    fn null_requires_a_nullable_column() {
        let mut col = column(TextWidth::PLAIN, TextConfig::default());
        let err = col.set_value(Datum::Null).unwrap_err();
        assert_eq!(err.kind(), &ValueErrorKind::NullNotAllowed);
    }

    proptest! {
        #[test]
        fn stored_values_always_fit_the_capacity(s in ".{0,64}") {
            let mut col = TextValue::with_max_length(32, TextConfig::default(), catalog()).unwrap();
            if col.set_value(Datum::from(s)).is_ok() {
                if let Datum::String(v) = col.value() {
                    prop_assert!(v.len() <= 32);
                }
            }
        }
    }
}
