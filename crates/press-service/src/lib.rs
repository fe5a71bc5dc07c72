//! # Press Service
//!
//! Content queries over the repository layer.
//!
//! [`QueryService`] is the typed entry point; [`QueryRegistry`] exposes the
//! same operations by name with JSON arguments and accepts extensions.
//! [`PressModuleBuilder`] wires both over MySQL or an in-memory store.

pub mod dto;
pub mod r#impl;
pub mod menu_tree;
pub mod meta_filter;
pub mod module;
pub mod query_service;
pub mod registry;
pub mod thumbnail;

pub use dto::*;
pub use menu_tree::{menu_item_from_post, MenuTreeBuilder};
pub use meta_filter::filter_meta;
pub use module::{PressModule, PressModuleBuilder, Repositories};
pub use query_service::QueryService;
pub use r#impl::QueryServiceImpl;
pub use registry::{parse_args, query_fn, to_json, FnQuery, NamedQuery, QueryContext, QueryRegistry, QueryRegistryBuilder};
pub use thumbnail::ThumbnailResolver;
