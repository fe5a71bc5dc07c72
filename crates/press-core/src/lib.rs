//! # Press Core
//!
//! Core types, domain entities, and error definitions for the Press content
//! query layer. Every other crate in the workspace builds on these.

pub mod domain;
pub mod error;
pub mod health;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use health::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
