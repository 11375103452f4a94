// ABOUTME: Logging configuration and structured logging setup for the scanner
// ABOUTME: Configures log levels and formats, plus structured helpers for scan outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.

use std::env;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use food_scan_core::constants::service_names;
use tracing::{debug, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::recognition::{Recognition, RecognitionSource};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for log shipping
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(anyhow!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            service_name: service_names::FOOD_SCAN.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.format),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            service_name: defaults.service_name,
            service_version: defaults.service_version,
        }
    }

    /// Override the level, e.g. from a `--verbose` flag
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Build the filter: configured level plus noise reduction for HTTP internals
    ///
    /// # Errors
    ///
    /// Returns an error if the level is not a valid filter directive
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| anyhow!("invalid log filter '{}': {e}", self.level))?;
        for directive in ["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"] {
            filter = filter.add_directive(directive.parse::<Directive>()?);
        }
        Ok(filter)
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if the filter is invalid or a subscriber is already set
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter()?);

        let initialized = match self.format {
            LogFormat::Json => registry
                .with(
                    tracing_fmt::layer()
                        .json()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stderr),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    tracing_fmt::layer()
                        .pretty()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stderr),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    tracing_fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .try_init(),
        };
        initialized.map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

        debug!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            log.level = %self.level,
            log.format = %self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Scan-specific logging utilities
pub struct ScanLogger;

impl ScanLogger {
    /// Log the outcome of one scan
    pub fn log_scan_outcome(recognition: &Recognition, elapsed: Duration) {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        info!(
            scan.source = %recognition.source,
            scan.food_name = %recognition.record.food_name,
            scan.confidence = recognition.record.confidence,
            scan.calories = recognition.record.calories,
            scan.label = recognition.prediction.as_ref().map_or("", |p| p.label.as_str()),
            scan.duration_ms = duration_ms,
            scan.degraded = recognition.source != RecognitionSource::Classifier,
            "Food scan completed"
        );
    }

    /// Log a direct table lookup
    pub fn log_lookup(query: &str, match_kind: &str, food_name: Option<&str>) {
        info!(
            lookup.query = %query,
            lookup.kind = %match_kind,
            lookup.food_name = food_name.unwrap_or(""),
            "Nutrition lookup"
        );
    }
}
