//! Modrinth registry client for hopper
//!
//! This crate provides HTTP client functionality for looking up projects,
//! searching by name, listing versions, and downloading version files from
//! the Modrinth v2 API, with connection pooling and retry logic.

pub mod api;
pub mod client;

// Re-export main types
pub use api::{
    DependencyKind, Project, SearchResults, Version, VersionDependency, VersionFile, VersionType,
};
pub use client::{RegistryClient, RetryConfig};

use hopper_core::error::HopperError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, HopperError>;
