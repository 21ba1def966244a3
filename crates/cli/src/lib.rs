//! Command-line interface for Watchline.
//!
//! This crate exposes the text analysis layer as subcommands that read text
//! from an argument or from standard input.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Error types for CLI operations.
pub mod error;
