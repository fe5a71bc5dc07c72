//! MySQL repository implementations.

mod post_repository;
mod rows;
mod select;
mod table_accessor;
mod term_repository;

pub use post_repository::*;
pub use table_accessor::*;
pub use term_repository::*;
