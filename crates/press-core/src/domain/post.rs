//! Post entity.

use crate::PostId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Well-known `post_status` values. The column itself is free-form.
pub mod post_status {
    /// Publicly visible content.
    pub const PUBLISH: &str = "publish";
    /// Unpublished draft.
    pub const DRAFT: &str = "draft";
    /// Attachments and revisions inherit their parent's status.
    pub const INHERIT: &str = "inherit";
}

/// Well-known `post_type` values. The column itself is free-form.
pub mod post_type {
    /// Blog article.
    pub const POST: &str = "post";
    /// Static page.
    pub const PAGE: &str = "page";
    /// Uploaded media.
    pub const ATTACHMENT: &str = "attachment";
    /// Entry of a navigation menu.
    pub const NAV_MENU_ITEM: &str = "nav_menu_item";
}

/// A row of the posts table.
///
/// Articles, pages, media attachments and menu entries all share this table
/// and are told apart by `post_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// `ID` column.
    pub id: PostId,
    pub post_author: u64,
    /// Local publish time. Zero dates in the store read as `None`.
    pub post_date: Option<NaiveDateTime>,
    pub post_modified: Option<NaiveDateTime>,
    pub post_title: String,
    pub post_content: String,
    pub post_excerpt: String,
    pub post_status: String,
    pub post_type: String,
    /// Slug.
    pub post_name: String,
    /// Parent post, zero for none.
    pub post_parent: PostId,
    pub menu_order: i32,
    pub guid: String,
}

impl Post {
    /// Creates a post with empty content fields.
    ///
    /// Mostly useful for fixtures; rows read from the store are fully populated.
    #[must_use]
    pub fn new(id: PostId, post_type: impl Into<String>, post_status: impl Into<String>) -> Self {
        Self {
            id,
            post_author: 0,
            post_date: None,
            post_modified: None,
            post_title: String::new(),
            post_content: String::new(),
            post_excerpt: String::new(),
            post_status: post_status.into(),
            post_type: post_type.into(),
            post_name: String::new(),
            post_parent: PostId::default(),
            menu_order: 0,
            guid: String::new(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.post_title = title.into();
        self
    }

    /// Sets the slug.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.post_name = name.into();
        self
    }

    /// Sets the menu order.
    #[must_use]
    pub const fn with_menu_order(mut self, menu_order: i32) -> Self {
        self.menu_order = menu_order;
        self
    }

    /// Sets the parent post.
    #[must_use]
    pub const fn with_parent(mut self, parent: PostId) -> Self {
        self.post_parent = parent;
        self
    }

    /// Checks whether the post is publicly visible.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.post_status == post_status::PUBLISH
    }

    /// Checks the post type.
    #[must_use]
    pub fn is_type(&self, post_type: &str) -> bool {
        self.post_type == post_type
    }
}
