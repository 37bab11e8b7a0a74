//! Entity models shared across the VendyX backend

pub mod category;
pub mod client;
pub mod product;
pub mod sale;
pub mod user;

pub use category::*;
pub use client::*;
pub use product::*;
pub use sale::*;
pub use user::*;
