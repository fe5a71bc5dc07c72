//! # Press Repository
//!
//! Read-only access to the five content tables.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn PostRepository>, Arc<dyn PostMetaRepository>, ...  (per-table traits)
//! MySqlPostRepository, ...   or   InMemoryContentStore
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! Table names carry a prefix fixed at construction ([`TableNames`]).
//! Declared schemas ([`TableRegistry`]) allow generic filtered reads through
//! [`TableAccessor`], including tables outside the core five.

pub mod filter;
pub mod memory;
pub mod mysql;
pub mod pool;
pub mod schema;
pub mod tables;
pub mod traits;

pub use filter::*;
pub use memory::InMemoryContentStore;
pub use mysql::*;
pub use pool::*;
pub use schema::*;
pub use tables::TableNames;
pub use traits::*;
