//! Core data types for the hopper update run.
//!
//! This module provides the fundamental types used throughout hopper:
//! - Registry identity and compatibility target types
//! - Local archive handles
//! - Outcome records and the insertion-ordered update report

pub mod archive;
pub mod identity;
pub mod outcome;
pub mod target;

// Re-export all public types
pub use archive::LocalArchive;
pub use identity::ProjectIdentity;
pub use outcome::{OutcomeRecord, OutcomeStatus, UpdateReport};
pub use target::CompatibilityTarget;
