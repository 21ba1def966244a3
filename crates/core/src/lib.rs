//! Core types, errors, and configuration for Watchline
//!
//! This crate provides the message model, locale bundle and deployment
//! configuration shared by the Watchline text analysis layer and its CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod locale;
pub mod types;
pub mod util;

// Re-exports for convenience
pub use config::WatchlineConfig;
pub use error::{Error, Result};
pub use locale::LocaleBundle;
pub use types::*;
