// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The column data types.
//!
//! One module per SQL type family. Each type validates values against its
//! configuration, renders its SQL column definition, and produces a
//! structured snapshot.

pub mod date;
pub mod datetime;
pub mod decimal;
pub mod float;
pub mod int;
pub mod text;
pub mod time;
pub mod timestamp;
pub mod varchar;
pub mod year;
