//! Service implementations.
//!
//! Trait definitions live in the parent module (`query_service.rs`).

pub mod query_service_impl;

pub use query_service_impl::QueryServiceImpl;
