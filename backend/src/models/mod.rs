//! Model re-exports for handler and service code

pub use shared::models::*;
