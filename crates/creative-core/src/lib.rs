//! Core types, design-rule records, and errors for the creative layout engine.
//!
//! This crate provides the foundational types used across the other creative crates:
//! - Gravity anchors and priority tiers
//! - The persisted design-rule format (container fields plus layer records)
//! - Error types for building, reflowing, and persisting layouts

pub mod errors;
pub mod rules;
pub mod types;

pub use errors::*;
pub use rules::*;
pub use types::*;
