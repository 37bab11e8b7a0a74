//! HTTP handlers for the VendyX backend

pub mod auth;
pub mod category;
pub mod client;
pub mod health;
pub mod product;
pub mod sale;

pub use auth::*;
pub use category::*;
pub use client::*;
pub use health::*;
pub use product::*;
pub use sale::*;
