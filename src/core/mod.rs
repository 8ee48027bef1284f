pub mod cover;
pub mod data;
pub mod filter;
pub mod index;
pub mod keys;
pub mod sanitize;
pub mod scroll;
pub mod settings;

#[cfg(test)]
pub(crate) mod fixtures;
