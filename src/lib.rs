//! Category navigation and filtering for a curated artist portfolio.
//!
//! The [`core`] modules are pure functions over a read-only
//! [`types::ContentSnapshot`]; [`server`] exposes them over HTTP.

pub mod auth;
pub mod core;
pub mod error;
pub mod server;
pub mod types;
