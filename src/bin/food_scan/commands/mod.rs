// ABOUTME: Command modules for the food-scan CLI
// ABOUTME: Scanning commands and nutrition table queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod lookup;
pub mod scan;
