//! # Press Config
//!
//! Configuration management for the Press content query layer.
//! Supports layered configuration from files and environment variables,
//! validated before any connection is attempted.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
