// ABOUTME: Environment-based scanner configuration with typed parsing and validation
// ABOUTME: Classifier endpoint, stand-in delay, fallback policy, and optional table file paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use food_scan_core::constants::classifier::{
    DEFAULT_HF_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use food_scan_core::constants::stand_in::DEFAULT_DELAY_MS;
use food_scan_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::nutrition::{ClassMapping, NutritionTable};
use crate::recognition::HuggingFaceConfig;

/// Environment variable names read by [`ScannerConfig::from_env`]
pub mod env_vars {
    /// Inference API base URL
    pub const HF_BASE_URL: &str = "FOOD_SCAN_HF_BASE_URL";
    /// Model repository id
    pub const MODEL: &str = "FOOD_SCAN_MODEL";
    /// Bearer token for the inference API
    pub const HF_API_TOKEN: &str = "HF_API_TOKEN";
    /// HTTP timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "FOOD_SCAN_HTTP_TIMEOUT_SECS";
    /// Stand-in recognizer delay in milliseconds
    pub const STAND_IN_DELAY_MS: &str = "FOOD_SCAN_STAND_IN_DELAY_MS";
    /// `arbitrary` or `estimated`
    pub const FALLBACK_POLICY: &str = "FOOD_SCAN_FALLBACK_POLICY";
    /// Path to a JSON nutrition table
    pub const NUTRITION_TABLE: &str = "FOOD_SCAN_NUTRITION_TABLE";
    /// Path to a JSON class mapping
    pub const CLASS_MAPPING: &str = "FOOD_SCAN_CLASS_MAPPING";

    /// Every variable, for tests that need a clean environment
    pub const ALL: [&str; 8] = [
        HF_BASE_URL,
        MODEL,
        HF_API_TOKEN,
        HTTP_TIMEOUT_SECS,
        STAND_IN_DELAY_MS,
        FALLBACK_POLICY,
        NUTRITION_TABLE,
        CLASS_MAPPING,
    ];
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value found in the environment
        value: String,
        /// Parser message
        reason: String,
    },

    /// Unknown fallback policy name
    #[error("Unknown fallback policy '{0}' (expected 'arbitrary' or 'estimated')")]
    UnknownPolicy(String),

    /// A setting is present but outside its allowed range
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Environment variable is not valid unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}

/// What the recognizer returns when no table record resembles the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Hand back a random table record at confidence 0.6
    #[default]
    #[serde(rename = "arbitrary")]
    ArbitraryRecord,
    /// Hand back the explicit estimated-values record
    Estimated,
}

impl FromStr for FallbackPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arbitrary" | "random" => Ok(Self::ArbitraryRecord),
            "estimated" | "estimate" => Ok(Self::Estimated),
            _ => Err(ConfigError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArbitraryRecord => write!(f, "arbitrary"),
            Self::Estimated => write!(f, "estimated"),
        }
    }
}

/// Nutrition table and class mapping selected by configuration
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    /// Nutrition records keyed by canonical food key
    pub table: Arc<NutritionTable>,
    /// Classifier key aliases
    pub mapping: Arc<ClassMapping>,
}

/// Scanner configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Remote classifier settings
    pub huggingface: HuggingFaceConfig,
    /// Simulated processing delay of the stand-in recognizer
    pub stand_in_delay: Duration,
    /// Behaviour when a label matches nothing in the table
    pub fallback_policy: FallbackPolicy,
    /// Optional JSON nutrition table replacing the built-in one
    pub nutrition_table_path: Option<PathBuf>,
    /// Optional JSON class mapping replacing the built-in one
    pub class_mapping_path: Option<PathBuf>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            huggingface: HuggingFaceConfig::default(),
            stand_in_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            fallback_policy: FallbackPolicy::default(),
            nutrition_table_path: None,
            class_mapping_path: None,
        }
    }
}

impl ScannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails
    /// [`validate`](Self::validate)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            huggingface: HuggingFaceConfig {
                base_url: env_var_or(env_vars::HF_BASE_URL, DEFAULT_HF_BASE_URL)?,
                model: env_var_or(env_vars::MODEL, DEFAULT_MODEL)?,
                api_token: env_var_opt(env_vars::HF_API_TOKEN)?,
                timeout: Duration::from_secs(env_parse_or(
                    env_vars::HTTP_TIMEOUT_SECS,
                    DEFAULT_TIMEOUT_SECS,
                )?),
            },
            stand_in_delay: Duration::from_millis(env_parse_or(
                env_vars::STAND_IN_DELAY_MS,
                DEFAULT_DELAY_MS,
            )?),
            fallback_policy: env_var_opt(env_vars::FALLBACK_POLICY)?
                .map_or(Ok(FallbackPolicy::default()), |raw| raw.parse())?,
            nutrition_table_path: env_var_opt(env_vars::NUTRITION_TABLE)?.map(PathBuf::from),
            class_mapping_path: env_var_opt(env_vars::CLASS_MAPPING)?.map(PathBuf::from),
        };

        config.validate()?;
        info!(
            model = %config.huggingface.model,
            authenticated = config.huggingface.api_token.is_some(),
            fallback_policy = %config.fallback_policy,
            "Scanner configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero HTTP timeout, an empty model id, or a base
    /// URL that is not http(s)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.huggingface.timeout.is_zero() {
            return Err(ConfigError::ValueOutOfRange(
                "FOOD_SCAN_HTTP_TIMEOUT_SECS must be greater than zero",
            ));
        }
        if self.huggingface.model.trim().is_empty() {
            return Err(ConfigError::ValueOutOfRange(
                "FOOD_SCAN_MODEL must not be empty",
            ));
        }
        let base_url = &self.huggingface.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                var: env_vars::HF_BASE_URL,
                value: base_url.clone(),
                reason: "expected an http:// or https:// URL".to_owned(),
            });
        }
        Ok(())
    }

    /// Load the configured reference tables, falling back to the built-ins
    ///
    /// # Errors
    ///
    /// Returns an error if a configured file cannot be read or fails validation
    pub fn load_tables(&self) -> AppResult<ReferenceTables> {
        let table = match &self.nutrition_table_path {
            Some(path) => Arc::new(NutritionTable::from_file(path)?),
            None => NutritionTable::builtin(),
        };
        let mapping = match &self.class_mapping_path {
            Some(path) => Arc::new(ClassMapping::from_file(path)?),
            None => ClassMapping::builtin(),
        };

        for canonical in mapping.targets() {
            if !table.contains_key(canonical) {
                warn!(
                    canonical,
                    "Class mapping target has no nutrition record; lookups will use similarity"
                );
            }
        }

        Ok(ReferenceTables { table, mapping })
    }
}

/// Get environment variable or default value
fn env_var_or(key: &'static str, default: &str) -> Result<String, ConfigError> {
    Ok(env_var_opt(key)?.unwrap_or_else(|| default.to_owned()))
}

/// Get environment variable, treating unset and blank as absent
fn env_var_opt(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Parse environment variable or return the default
fn env_parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    env_var_opt(key)?.map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: key,
            value: raw.clone(),
            reason: e.to_string(),
        })
    })
}
