//! Business logic services for the VendyX backend

pub mod auth;
pub mod category;
pub mod client;
pub mod product;
pub mod sale;

pub use auth::AuthService;
pub use category::CategoryService;
pub use client::ClientService;
pub use product::ProductService;
pub use sale::SaleService;
