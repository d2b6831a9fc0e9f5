//! Transport records exchanged with the storefront backend.

pub mod auth;
pub mod brand;
pub mod category;
pub mod envelope;
pub mod file;
pub mod product;
pub mod sale;
pub mod session;
pub mod types;
