//! # Tabula Config
//!
//! Layered configuration for the tabula access layer: defaults, per-
//! environment TOML files, local overrides, and `TABULA__`-prefixed
//! environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
