//! Text analysis for Watchline.
//!
//! This crate provides text normalization, language detection by detector
//! consensus, UTF-16 entity extraction, report-record parsing and the
//! message helpers built on top of them.

#![deny(missing_docs, unsafe_code)]

/// Error types for analysis operations.
pub mod error;

/// Symbol, emoji, substitution and script conversion tables.
pub mod tables;

/// Text normalization pipeline.
pub mod normalize;

/// Language detection by detector consensus.
pub mod lang;

/// Entity text extraction by UTF-16 offsets.
pub mod entity;

/// Report-record parsing and HTML formatting.
pub mod report;

/// Message text, link and name helpers.
pub mod message;

pub use entity::extract_entity_text;
pub use error::{AnalysisError, AnalysisResult};
pub use lang::{detect_language, ConsensusPolicy, LanguageDetector, LanguageEngine, LanguageSets};
pub use normalize::{normalize, NormalizationConfig, TargetScript, TextNormalizer};
pub use report::{parse_record, LabelTable, ReportBuilder, ReportField, ReportRecord};
