// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Owned scalar values exchanged with column types.

use std::fmt;

/// A single owned scalar value.
///
/// `Datum` is the common currency between callers and column types: values
/// flow into `set_value` and back out of `value` as datums, with
/// [`Datum::Null`] encoding an absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// The absent value.
    Null,
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// An owned string.
    String(String),
}

impl Datum {
    /// Reports whether this datum is [`Datum::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// A short name for the datum's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Int(_) => "integer",
            Datum::Float(_) => "float",
            Datum::String(_) => "string",
        }
    }

    /// The JSON rendering of this datum, as used by snapshots.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Datum::Null => serde_json::Value::Null,
            Datum::Int(i) => serde_json::Value::from(*i),
            Datum::Float(f) => serde_json::Value::from(*f),
            Datum::String(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("NULL"),
            Datum::Int(i) => write!(f, "{}", i),
            Datum::Float(v) => write!(f, "{}", v),
            Datum::String(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Datum {
    fn from(i: i32) -> Datum {
        Datum::Int(i64::from(i))
    }
}

impl From<i64> for Datum {
    fn from(i: i64) -> Datum {
        Datum::Int(i)
    }
}

impl From<f64> for Datum {
    fn from(f: f64) -> Datum {
        Datum::Float(f)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Datum {
        Datum::String(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Datum {
        Datum::String(s)
    }
}

impl<T> From<Option<T>> for Datum
where
    T: Into<Datum>,
{
    fn from(option: Option<T>) -> Datum {
        match option {
            Some(t) => t.into(),
            None => Datum::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Datum::from(5), Datum::Int(5));
        assert_eq!(Datum::from(5i64), Datum::Int(5));
        assert_eq!(Datum::from(1.5), Datum::Float(1.5));
        assert_eq!(Datum::from("x"), Datum::String("x".to_string()));
        assert_eq!(Datum::from(None::<i64>), Datum::Null);
        assert_eq!(Datum::from(Some(7)), Datum::Int(7));
    }

    #[test]
    fn display() {
        assert_eq!(Datum::Null.to_string(), "NULL");
        assert_eq!(Datum::Int(-3).to_string(), "-3");
        assert_eq!(Datum::Float(2.5).to_string(), "2.5");
        assert_eq!(Datum::String("a b".to_string()).to_string(), "a b");
    }

    #[test]
    fn json() {
        assert_eq!(Datum::Null.to_json(), serde_json::Value::Null);
        assert_eq!(Datum::Int(42).to_json(), serde_json::json!(42));
        assert_eq!(Datum::Float(1.25).to_json(), serde_json::json!(1.25));
        assert_eq!(Datum::String("s".to_string()).to_json(), serde_json::json!("s"));
    }
}
