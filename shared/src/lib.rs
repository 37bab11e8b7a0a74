//! Shared types and models for the VendyX point-of-sale backend
//!
//! This crate contains the wire-level entity models and the pure
//! money/validation helpers used by the backend services and tests.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
