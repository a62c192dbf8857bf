//! # Business Logic Services
//!
//! This module contains the services backing the DovvyBuddy HTTP handlers.
//!
//! ## Available Services
//!
//! - **Database** (`database`) - Lazily created, process-wide PostgreSQL client
//! - **Health** (`health`) - Point-in-time health reporting

pub mod database;
pub mod health;
