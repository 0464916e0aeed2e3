//! ASC Operator Console
//!
//! Backend for the travel-insurance operator dashboard. It fetches the
//! issuance platform's loosely shaped JSON, normalizes it into typed views
//! and serves them to the dashboard.
//!
//! # Modules
//!
//! - `api_client`: Client for the issuance platform API.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `fields`: Field-name fallback chains and value coercions.
//! - `handlers`: HTTP request handlers and routes.
//! - `issuance`: Bulk and single issuance forms.
//! - `models`: Normalized data models.
//! - `normalizer`: Response normalizers and display formatting.
//! - `operator`: Operator profile and its edit round trip.
//! - `views`: Page-level view models.

pub mod api_client;
pub mod config;
pub mod errors;
pub mod fields;
pub mod handlers;
pub mod issuance;
pub mod models;
pub mod normalizer;
pub mod operator;
pub mod views;
