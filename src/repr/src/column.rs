// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The capability trait shared by all column types, and the closed union
//! over them.

use sqlcol_i18n::Catalog;

use crate::adt::date::DateValue;
use crate::adt::datetime::DatetimeValue;
use crate::adt::decimal::{DecimalConfig, DecimalValue};
use crate::adt::float::{FloatConfig, FloatValue};
use crate::adt::int::{IntConfig, IntValue, IntWidth};
use crate::adt::text::{TextConfig, TextValue, TextWidth};
use crate::adt::time::TimeValue;
use crate::adt::timestamp::TimestampValue;
use crate::adt::varchar::{VarcharConfig, VarcharValue};
use crate::adt::year::YearValue;
use crate::datum::Datum;
use crate::error::TypeError;

/// Operations every column type provides.
///
/// The trait is object safe, so heterogeneous schemas can be held as
/// `Vec<Box<dyn DataType>>`; [`Column`] is the closed-union alternative
/// for callers that want to match on the concrete type.
pub trait DataType {
    /// Validates and stores a value.
    fn set_value(&mut self, value: Datum) -> Result<(), TypeError>;

    /// The stored value, in its rendered form.
    fn value(&self) -> Datum;

    /// The SQL column definition.
    fn sql_declaration(&self) -> String;

    /// The structured representation of the column.
    fn snapshot(&self) -> serde_json::Value;
}

macro_rules! impl_data_type {
    ($ty:ty) => {
        impl DataType for $ty {
            fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
                <$ty>::set_value(self, value)
            }

            fn value(&self) -> Datum {
                <$ty>::value(self)
            }

            fn sql_declaration(&self) -> String {
                <$ty>::sql_declaration(self)
            }

            fn snapshot(&self) -> serde_json::Value {
                <$ty>::snapshot(self)
            }
        }
    };
}

impl_data_type!(IntValue);
impl_data_type!(DecimalValue);
impl_data_type!(FloatValue);
impl_data_type!(VarcharValue);
impl_data_type!(TextValue);
impl_data_type!(DateValue);
impl_data_type!(DatetimeValue);
impl_data_type!(TimeValue);
impl_data_type!(TimestampValue);
impl_data_type!(YearValue);

/// A column value of any supported type.
///
/// The variant fixes the SQL type; the constructors pair each variant with
/// the width preset it stands for, so a `Column::TinyInt` always carries a
/// `TINYINT`-bounded [`IntValue`].
#[derive(Debug, Clone)]
pub enum Column {
    TinyInt(IntValue),
    SmallInt(IntValue),
    MediumInt(IntValue),
    Int(IntValue),
    Decimal(DecimalValue),
    Float(FloatValue),
    Varchar(VarcharValue),
    TinyText(TextValue),
    Text(TextValue),
    MediumText(TextValue),
    LongText(TextValue),
    Date(DateValue),
    Datetime(DatetimeValue),
    Time(TimeValue),
    Timestamp(TimestampValue),
    Year(YearValue),
}

macro_rules! for_each_column {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Column::TinyInt($inner) => $body,
            Column::SmallInt($inner) => $body,
            Column::MediumInt($inner) => $body,
            Column::Int($inner) => $body,
            Column::Decimal($inner) => $body,
            Column::Float($inner) => $body,
            Column::Varchar($inner) => $body,
            Column::TinyText($inner) => $body,
            Column::Text($inner) => $body,
            Column::MediumText($inner) => $body,
            Column::LongText($inner) => $body,
            Column::Date($inner) => $body,
            Column::Datetime($inner) => $body,
            Column::Time($inner) => $body,
            Column::Timestamp($inner) => $body,
            Column::Year($inner) => $body,
        }
    };
}

impl Column {
    /// Creates a `TINYINT` column.
    pub fn tiny_int(config: IntConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::TinyInt(IntValue::new(IntWidth::TINY, config, catalog)?))
    }

    /// Creates a `SMALLINT` column.
    pub fn small_int(config: IntConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::SmallInt(IntValue::new(IntWidth::SMALL, config, catalog)?))
    }

    /// Creates a `MEDIUMINT` column.
    pub fn medium_int(config: IntConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::MediumInt(IntValue::new(IntWidth::MEDIUM, config, catalog)?))
    }

    /// Creates an `INT` column.
    pub fn int(config: IntConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::Int(IntValue::new(IntWidth::INT, config, catalog)?))
    }

    /// Creates a `DECIMAL` column.
    pub fn decimal(config: DecimalConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::Decimal(DecimalValue::new(config, catalog)?))
    }

    /// Creates a `FLOAT` column.
    pub fn float(config: FloatConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::Float(FloatValue::new(config, catalog)?))
    }

    /// Creates a `VARCHAR` column.
    pub fn varchar(config: VarcharConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::Varchar(VarcharValue::new(config, catalog)?))
    }

    /// Creates a `TINYTEXT` column.
    pub fn tiny_text(config: TextConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::TinyText(TextValue::new(TextWidth::TINY, config, catalog)?))
    }

    /// Creates a `TEXT` column.
    pub fn text(config: TextConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::Text(TextValue::new(TextWidth::PLAIN, config, catalog)?))
    }

    /// Creates a `TEXT` column with a custom byte capacity.
    pub fn text_with_max_length(
        max_bytes: u64,
        config: TextConfig,
        catalog: Catalog,
    ) -> Result<Column, TypeError> {
        Ok(Column::Text(TextValue::with_max_length(max_bytes, config, catalog)?))
    }

    /// Creates a `MEDIUMTEXT` column.
    pub fn medium_text(config: TextConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::MediumText(TextValue::new(TextWidth::MEDIUM, config, catalog)?))
    }

    /// Creates a `LONGTEXT` column.
    pub fn long_text(config: TextConfig, catalog: Catalog) -> Result<Column, TypeError> {
        Ok(Column::LongText(TextValue::new(TextWidth::LONG, config, catalog)?))
    }

    /// Creates a `DATE` column.
    pub fn date(
        nullable: bool,
        default: Option<&str>,
        catalog: Catalog,
    ) -> Result<Column, TypeError> {
        Ok(Column::Date(DateValue::new(nullable, default, catalog)?))
    }

    /// Creates a `DATETIME` column.
    pub fn datetime(
        nullable: bool,
        default: Option<&str>,
        catalog: Catalog,
    ) -> Result<Column, TypeError> {
        Ok(Column::Datetime(DatetimeValue::new(nullable, default, catalog)?))
    }

    /// Creates a `TIME` column.
    pub fn time(
        nullable: bool,
        default: Option<&str>,
        catalog: Catalog,
    ) -> Result<Column, TypeError> {
        Ok(Column::Time(TimeValue::new(nullable, default, catalog)?))
    }

    /// Creates a `TIMESTAMP` column.
    pub fn timestamp(
        nullable: bool,
        default: Option<i64>,
        catalog: Catalog,
    ) -> Result<Column, TypeError> {
        Ok(Column::Timestamp(TimestampValue::new(nullable, default, catalog)?))
    }

    /// Creates a `YEAR` column.
    pub fn year(
        nullable: bool,
        default: Option<i64>,
        catalog: Catalog,
    ) -> Result<Column, TypeError> {
        Ok(Column::Year(YearValue::new(nullable, default, catalog)?))
    }

    /// The SQL type name of this column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::TinyInt(v) | Column::SmallInt(v) | Column::MediumInt(v) | Column::Int(v) => {
                v.width().name()
            }
            Column::Decimal(_) => "DECIMAL",
            Column::Float(_) => "FLOAT",
            Column::Varchar(_) => "VARCHAR",
            Column::TinyText(v)
            | Column::Text(v)
            | Column::MediumText(v)
            | Column::LongText(v) => v.width().name(),
            Column::Date(_) => "DATE",
            Column::Datetime(_) => "DATETIME",
            Column::Time(_) => "TIME",
            Column::Timestamp(_) => "TIMESTAMP",
            Column::Year(_) => "YEAR",
        }
    }
}

impl DataType for Column {
    fn set_value(&mut self, value: Datum) -> Result<(), TypeError> {
        for_each_column!(self, inner => inner.set_value(value))
    }

    fn value(&self) -> Datum {
        for_each_column!(self, inner => inner.value())
    }

    fn sql_declaration(&self) -> String {
        for_each_column!(self, inner => inner.sql_declaration())
    }

    fn snapshot(&self) -> serde_json::Value {
        for_each_column!(self, inner => inner.snapshot())
    }
}
