//! # HTTP Request Handlers
//!
//! This module contains all HTTP request handlers for the DovvyBuddy service.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application and database health reporting
//! - **Landing** (`landing`) - Static landing page and unknown-route fallback

mod health_check;
mod landing;

pub use health_check::*;
pub use landing::*;
