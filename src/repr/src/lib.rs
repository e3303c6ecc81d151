// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Typed, validating representations of SQL column values.
//!
//! Each supported column type pairs a configuration with a current value
//! and refuses any assignment that violates the configuration: nullability,
//! numeric ranges, digit budgets, character and byte lengths, calendar
//! validity. Columns render their SQL definitions via
//! [`DataType::sql_declaration`] and their structured state via
//! [`DataType::snapshot`], and every rejection carries a message localized
//! through the catalog the column was built with.
//!
//! ```
//! use sqlcol_i18n::{Catalog, Locale};
//! use sqlcol_repr::adt::int::IntConfig;
//! use sqlcol_repr::{Column, DataType, Datum};
//!
//! let catalog = Catalog::load(Locale::En)?;
//! let mut id = Column::int(
//!     IntConfig {
//!         unsigned: true,
//!         auto_increment: true,
//!         ..Default::default()
//!     },
//!     catalog,
//! )?;
//! id.set_value(Datum::Int(41))?;
//! assert_eq!(id.sql_declaration(), "INT(11) UNSIGNED AUTO_INCREMENT NOT NULL");
//! assert!(id.set_value(Datum::Int(-1)).is_err());
//! assert_eq!(id.value(), Datum::Int(41));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

pub mod adt;
pub mod column;
pub mod datum;
pub mod error;
pub mod strconv;

pub use crate::column::{Column, DataType};
pub use crate::datum::Datum;
pub use crate::error::{ErrorClass, TypeError, ValueErrorKind};
