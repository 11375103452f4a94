// ABOUTME: Core types and constants for the food-scan nutrition pipeline
// ABOUTME: Foundation crate with error handling, nutrition models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Food Scan Core
//!
//! Foundation crate providing shared types and constants for the food-scan
//! pipeline. It changes rarely, so the main crate can rebuild without it.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the `AppResult` alias
//! - **models**: `NutritionRecord` and `NutrientAmount`
//! - **constants**: confidence penalties, sentinel labels, classifier defaults

/// Unified error handling with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
