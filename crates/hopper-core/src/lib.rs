//! # hopper-core
//!
//! Core types and utilities shared across all hopper crates.
//!
//! This crate provides:
//! - ProjectIdentity and CompatibilityTarget types for registry resolution
//! - OutcomeRecord and UpdateReport for per-mod run results
//! - HopperError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ProjectIdentity, UpdateReport, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{HopperError, HopperResult};
pub use types::{
    CompatibilityTarget, LocalArchive, OutcomeRecord, OutcomeStatus, ProjectIdentity,
    UpdateReport,
};
