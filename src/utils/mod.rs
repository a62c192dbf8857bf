//! # Utility Modules
//!
//! This module contains configuration, constants and telemetry setup used
//! throughout the DovvyBuddy service.
//!
//! ## Available Utilities
//!
//! - **Config** (`config`) - Fail-fast validation of the process environment
//! - **Constants** (`constant`) - Application-wide configuration constants
//! - **Secret** (`secret`) - `<NAME>_FILE` lookups for mounted credentials
//! - **Telemetry** (`telemetry`) - Tracing subscriber setup

pub mod config;
pub mod constant;
pub mod secret;
pub mod telemetry;
