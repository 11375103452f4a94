// ABOUTME: Configuration management module for scanner settings
// ABOUTME: Re-exports the environment-driven scanner configuration and fallback policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables; see [`environment::env_vars`]
//! for the full list. Reference tables may be replaced by JSON files whose
//! paths are themselves configured through the environment.

/// Environment-based scanner configuration
pub mod environment;

pub use environment::{env_vars, ConfigError, FallbackPolicy, ReferenceTables, ScannerConfig};
