//! Identification-and-resolution engine for hopper
//!
//! This crate maps opaque local mod archives to canonical registry
//! identities, selects the best compatible version for each under a fixed
//! compatibility target, and drives a breadth-first worklist over required
//! dependencies with cycle and duplicate safety.

pub mod identity;
pub mod manifest;
pub mod select;
pub mod update;

// Re-export main types
pub use identity::{slug_from_filename, IdentityResolver};
pub use manifest::ModManifest;
pub use select::select_best;
pub use update::{RunMode, UpdateEngine};
