//! Content query service trait definition.

use crate::dto::PostsArgs;
use async_trait::async_trait;
use press_core::{Interface, MenuItem, MetaId, MetaKeys, MetaMap, Post, PostId, PostMeta, PressResult, Term, Viewer};

/// Content query service.
///
/// Status filtering is deliberately asymmetric: listings and slug lookups
/// only see published posts, while lookup by id returns any status.
#[async_trait]
pub trait QueryService: Interface + Send + Sync {
    /// Returns the anonymous viewer.
    async fn get_viewer(&self) -> Viewer;

    /// Lists published posts of one type, ordered by id.
    async fn get_posts(&self, args: PostsArgs) -> PressResult<Vec<Post>>;

    /// Gets a post by id, whatever its status.
    async fn get_post_by_id(&self, id: PostId) -> PressResult<Post>;

    /// Gets the published post with the given slug, lowest id first.
    async fn get_post_by_name(&self, name: &str) -> PressResult<Post>;

    /// Resolves the featured image URL of a post.
    async fn get_post_thumbnail(&self, id: PostId) -> PressResult<Option<String>>;

    /// Gets a post's metadata, optionally restricted to some keys.
    async fn get_postmeta(&self, id: PostId, keys: Option<&MetaKeys>) -> PressResult<MetaMap>;

    /// Gets one metadata row by its id.
    async fn get_post_meta_by_id(&self, id: MetaId) -> PressResult<PostMeta>;

    /// Gets a navigation menu by slug as an ordered forest.
    async fn get_menu(&self, name: &str) -> PressResult<Vec<MenuItem>>;

    /// Lists the terms of one taxonomy attached to a post, ordered by term id.
    async fn get_post_terms(&self, id: PostId, taxonomy: &str) -> PressResult<Vec<Term>>;
}
