//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default values
//! - [`validation`]: startup checks

mod defaults;
mod types;
mod validation;

pub use types::Config;
pub use validation::validate;
