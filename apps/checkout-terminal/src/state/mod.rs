//! # Application State
//!
//! State resolved once at startup and read-only afterwards.
//!
//! - [`config`] - `AppConfig`: storage paths and number format

pub mod config;

pub use config::AppConfig;
