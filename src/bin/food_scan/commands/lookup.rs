// ABOUTME: Nutrition table query commands for food-scan
// ABOUTME: Exact or similarity lookups and a listing of entries with their aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use anyhow::Result;
use food_scan::config::ScannerConfig;
use food_scan::errors::AppError;
use food_scan::formatters::{format_record, to_json, OutputFormat};
use food_scan::logging::ScanLogger;
use food_scan::nutrition::SimilarityResolver;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FoodListing<'a> {
    key: &'a str,
    food_name: &'a str,
    calories: f64,
    aliases: Vec<&'a str>,
}

/// Look up a food by key, exactly or by similarity
pub fn lookup(
    config: &ScannerConfig,
    query: &str,
    exact: bool,
    format: OutputFormat,
) -> Result<String> {
    let tables = config.load_tables()?;
    let resolver = SimilarityResolver::new(tables.table);

    let record = if exact {
        let record = resolver
            .lookup_exact(query)
            .ok_or_else(|| AppError::not_found(format!("Food '{query}'")))?;
        ScanLogger::log_lookup(query, "exact", Some(&record.food_name));
        record
    } else {
        let kind = resolver.match_food(query).kind();
        let record = resolver.resolve(query);
        ScanLogger::log_lookup(query, kind, Some(&record.food_name));
        record
    };

    Ok(format_record(&record, format)?)
}

/// List every table entry in order
pub fn foods(config: &ScannerConfig, format: OutputFormat) -> Result<String> {
    let tables = config.load_tables()?;
    let listings: Vec<FoodListing<'_>> = tables
        .table
        .iter()
        .map(|(key, record)| FoodListing {
            key,
            food_name: &record.food_name,
            calories: record.calories,
            aliases: tables
                .mapping
                .aliases_of(key)
                .into_iter()
                .filter(|alias| alias != &key)
                .collect(),
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(to_json(&listings)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for listing in &listings {
                let _ = write!(
                    out,
                    "{:<10} {:<14} {:>5} kcal",
                    listing.key, listing.food_name, listing.calories
                );
                if !listing.aliases.is_empty() {
                    let _ = write!(out, "  <- {}", listing.aliases.join(", "));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}
