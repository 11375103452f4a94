// ABOUTME: Output format abstraction for presenting nutrition records
// ABOUTME: Supports JSON for machines and an aligned text layout for terminals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output Format Abstraction Layer
//!
//! - **JSON**: pretty-printed serde output, field names in camelCase
//! - **Text**: human-readable card with confidence, macros and their split,
//!   then vitamins and minerals when present

use std::fmt::{self, Write as _};

use food_scan_core::models::{NutrientAmount, NutritionRecord};
use serde::Serialize;

use crate::recognition::Recognition;

/// Output serialization format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// JSON when `json` is set, text otherwise
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for formatting operations
#[derive(Debug, Clone)]
pub struct FormatError {
    /// Error message describing what went wrong
    pub message: String,
    /// The format that was being used when the error occurred
    pub format: OutputFormat,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Format error ({}): {}", self.format, self.message)
    }
}

impl std::error::Error for FormatError {}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `FormatError` if serialization fails
pub fn to_json<T: Serialize>(data: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(|e| FormatError {
        message: e.to_string(),
        format: OutputFormat::Json,
    })
}

/// Render a nutrition record in the requested format
///
/// # Errors
///
/// Returns `FormatError` if JSON serialization fails
pub fn format_record(record: &NutritionRecord, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(record),
        OutputFormat::Text => Ok(render_record(record)),
    }
}

/// Render a recognition result; JSON includes the source and prediction
///
/// # Errors
///
/// Returns `FormatError` if JSON serialization fails
pub fn format_recognition(
    recognition: &Recognition,
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(recognition),
        OutputFormat::Text => {
            let mut out = render_record(&recognition.record);
            // Writing to a String cannot fail
            let _ = writeln!(out, "  {:<11} {}", "Source:", recognition.source);
            Ok(out)
        }
    }
}

/// Text card for a nutrition record
#[must_use]
pub fn render_record(record: &NutritionRecord) -> String {
    let split = record.macro_split();
    let share = |pct: Option<u32>| pct.map_or_else(String::new, |p| format!(" ({p}%)"));

    let mut out = String::new();
    let _ = writeln!(out, "{}", record.food_name);
    let _ = writeln!(out, "  {:<11} {}%", "Confidence:", record.confidence_percent());
    let _ = writeln!(out, "  {:<11} {} kcal", "Calories:", record.calories);
    let _ = writeln!(
        out,
        "  {:<11} {} g{}",
        "Protein:",
        record.proteins,
        share(split.map(|s| s.protein_pct))
    );
    let _ = writeln!(
        out,
        "  {:<11} {} g{}",
        "Carbs:",
        record.carbs,
        share(split.map(|s| s.carbs_pct))
    );
    let _ = writeln!(
        out,
        "  {:<11} {} g{}",
        "Fat:",
        record.fats,
        share(split.map(|s| s.fat_pct))
    );
    if let Some(vitamins) = non_empty(record.vitamins.as_deref()) {
        let _ = writeln!(out, "  {:<11} {}", "Vitamins:", join_amounts(vitamins));
    }
    if let Some(minerals) = non_empty(record.minerals.as_deref()) {
        let _ = writeln!(out, "  {:<11} {}", "Minerals:", join_amounts(minerals));
    }
    out
}

fn non_empty(list: Option<&[NutrientAmount]>) -> Option<&[NutrientAmount]> {
    list.filter(|items| !items.is_empty())
}

fn join_amounts(items: &[NutrientAmount]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", item.name, item.amount))
        .collect::<Vec<_>>()
        .join(", ")
}
