//! Data Transfer Objects.

pub mod query_args;

pub use query_args::*;
