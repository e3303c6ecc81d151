// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Walkthrough of the column value types.
//!
//! Builds a small user table out of typed columns, prints its SQL
//! declarations and JSON snapshots, then demonstrates validation failures,
//! auto increment, and zero fill. Pass `--locale ru` to see rejections
//! reported in Russian.

use anyhow::Context;
use clap::Parser;
use sqlcol_i18n::{Catalog, Locale};
use sqlcol_repr::adt::decimal::DecimalConfig;
use sqlcol_repr::adt::float::FloatConfig;
use sqlcol_repr::adt::int::IntConfig;
use sqlcol_repr::adt::text::TextConfig;
use sqlcol_repr::adt::varchar::VarcharConfig;
use sqlcol_repr::{Column, DataType, Datum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "sqlcol-demo", about = "Showcase the SQL column value types.")]
struct Args {
    /// Locale used for validation error messages.
    #[clap(long, default_value = "en")]
    locale: Locale,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let catalog = Catalog::load(args.locale).context("loading message catalog")?;

    let mut columns = build_schema(&catalog).context("building schema")?;
    info!(columns = columns.len(), "schema built");

    println!("CREATE TABLE users (");
    for (i, (name, column)) in columns.iter().enumerate() {
        let comma = if i + 1 < columns.len() { "," } else { "" };
        println!("    {} {}{}", name, column.sql_declaration(), comma);
    }
    println!(");");

    println!("\n-- populating row");
    populate(&mut columns)?;
    for (name, column) in &columns {
        println!("{} = {}", name, column.value());
    }

    println!("\n-- snapshots");
    for (name, column) in &columns {
        println!(
            "{}: {}",
            name,
            serde_json::to_string_pretty(&column.snapshot())?
        );
    }

    println!("\n-- rejected values");
    demonstrate_failures(&mut columns);

    Ok(())
}

/// The demo table: one column of each commonly used type.
fn build_schema(catalog: &Catalog) -> Result<Vec<(&'static str, Column)>, anyhow::Error> {
    let columns = vec![
        (
            "id",
            Column::int(
                IntConfig {
                    length: Some(10),
                    unsigned: true,
                    auto_increment: true,
                    ..Default::default()
                },
                catalog.clone(),
            )?,
        ),
        (
            "name",
            Column::varchar(
                VarcharConfig {
                    length: 100,
                    default: Some("guest".to_string()),
                    ..Default::default()
                },
                catalog.clone(),
            )?,
        ),
        (
            "balance",
            Column::decimal(
                DecimalConfig {
                    default: Some("0".to_string()),
                    ..Default::default()
                },
                catalog.clone(),
            )?,
        ),
        ("rating", Column::float(FloatConfig::default(), catalog.clone())?),
        ("bio", Column::text(TextConfig::default(), catalog.clone())?),
        ("born_on", Column::date(true, None, catalog.clone())?),
        ("last_seen", Column::datetime(true, None, catalog.clone())?),
        ("tz_offset", Column::time(true, None, catalog.clone())?),
        ("signed_up", Column::timestamp(true, None, catalog.clone())?),
        ("cohort", Column::year(true, None, catalog.clone())?),
        (
            "badge",
            Column::varchar(
                VarcharConfig {
                    length: 6,
                    zero_fill: true,
                    ..Default::default()
                },
                catalog.clone(),
            )?,
        ),
    ];
    Ok(columns)
}

fn populate(columns: &mut [(&'static str, Column)]) -> Result<(), anyhow::Error> {
    for (name, column) in columns.iter_mut() {
        let value = match *name {
            "id" => continue,
            "name" => Datum::from("Nia O'Brien"),
            "balance" => Datum::from("1000.50"),
            "rating" => Datum::Float(4.525),
            "bio" => Datum::from("<b>Hello</b> & welcome"),
            "born_on" => Datum::from("1994-03-17"),
            "last_seen" => Datum::from("2024-05-19 10:30:00"),
            "tz_offset" => Datum::from("-05:00:00"),
            "signed_up" => Datum::Int(1716112200),
            "cohort" => Datum::Int(2024),
            "badge" => Datum::from("42"),
            other => anyhow::bail!("no sample value for column {other}"),
        };
        column
            .set_value(value)
            .with_context(|| format!("populating column {name}"))?;
    }

    // The id column advances itself instead of taking a value.
    let id = columns
        .iter_mut()
        .find(|(name, _)| *name == "id")
        .map(|(_, column)| column);
    if let Some(Column::Int(id)) = id {
        for _ in 0..3 {
            let next = id.increment().context("advancing id")?;
            info!(next, "advanced id");
        }
    }
    Ok(())
}

/// Feeds each column a value it must refuse and prints the localized
/// message.
fn demonstrate_failures(columns: &mut [(&'static str, Column)]) {
    let attempts = [
        ("id", Datum::Int(-1)),
        ("name", Datum::Int(5)),
        ("balance", Datum::from("10000000000.00")),
        ("rating", Datum::from("fast")),
        ("born_on", Datum::from("1850-01-01")),
        ("last_seen", Datum::from("2024-13-01 00:00:00")),
        ("tz_offset", Datum::from("900:00:00")),
        ("signed_up", Datum::Int(-5)),
        ("cohort", Datum::Int(1776)),
    ];
    for (target, value) in attempts {
        let Some((name, column)) = columns.iter_mut().find(|(name, _)| *name == target) else {
            continue;
        };
        match column.set_value(value.clone()) {
            Ok(()) => println!("{}: unexpectedly accepted {}", name, value),
            Err(err) => println!("{} <- {}: {}", name, value, err),
        }
    }
}
