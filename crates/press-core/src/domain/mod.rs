//! Domain entities read from the content schema, plus the shapes derived from them.

pub mod menu;
pub mod post;
pub mod post_meta;
pub mod term;
pub mod viewer;

pub use menu::*;
pub use post::*;
pub use post_meta::*;
pub use term::*;
pub use viewer::*;
