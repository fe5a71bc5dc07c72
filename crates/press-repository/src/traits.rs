//! Repository trait definitions.
//!
//! One trait per table. Every `find` returns rows ordered by the table's
//! primary key ascending.

use crate::{PostFilter, PostMetaFilter, TermFilter, TermRelationshipFilter, TermTaxonomyFilter};
use async_trait::async_trait;
use press_core::{
    Interface, MetaId, MetaKeys, Post, PostId, PostMeta, PressResult, Term, TermRelationship, TermTaxonomy,
};

/// Posts table accessor.
#[async_trait]
pub trait PostRepository: Interface + Send + Sync {
    /// Finds posts matching the filter, ordered by `ID`.
    async fn find(&self, filter: &PostFilter) -> PressResult<Vec<Post>>;

    /// Finds a post by ID regardless of status.
    async fn find_by_id(&self, id: PostId) -> PressResult<Option<Post>> {
        let posts = self.find(&PostFilter::new().id(id).limit(1)).await?;
        Ok(posts.into_iter().next())
    }
}

/// Postmeta table accessor.
#[async_trait]
pub trait PostMetaRepository: Interface + Send + Sync {
    /// Finds meta rows matching the filter, ordered by `meta_id`.
    async fn find(&self, filter: &PostMetaFilter) -> PressResult<Vec<PostMeta>>;

    /// Finds a meta row by its id.
    async fn find_by_id(&self, id: MetaId) -> PressResult<Option<PostMeta>> {
        let rows = self.find(&PostMetaFilter::new().meta_id(id)).await?;
        Ok(rows.into_iter().next())
    }

    /// Finds the meta rows of one post, optionally restricted to some keys.
    async fn find_for_post(&self, post_id: PostId, keys: Option<&MetaKeys>) -> PressResult<Vec<PostMeta>> {
        let mut filter = PostMetaFilter::new().post_id(post_id);
        if let Some(keys) = keys {
            filter = filter.keys(keys.iter().map(str::to_string).collect());
        }
        self.find(&filter).await
    }
}

/// Terms table accessor.
#[async_trait]
pub trait TermRepository: Interface + Send + Sync {
    /// Finds terms matching the filter, ordered by `term_id`.
    async fn find(&self, filter: &TermFilter) -> PressResult<Vec<Term>>;

    /// Finds all terms with the given slug.
    async fn find_by_slug(&self, slug: &str) -> PressResult<Vec<Term>> {
        self.find(&TermFilter::new().slug(slug)).await
    }
}

/// Term taxonomy table accessor.
#[async_trait]
pub trait TermTaxonomyRepository: Interface + Send + Sync {
    /// Finds term taxonomy rows matching the filter, ordered by `term_taxonomy_id`.
    async fn find(&self, filter: &TermTaxonomyFilter) -> PressResult<Vec<TermTaxonomy>>;
}

/// Term relationships table accessor.
#[async_trait]
pub trait TermRelationshipRepository: Interface + Send + Sync {
    /// Finds relationships matching the filter, ordered by `(object_id, term_taxonomy_id)`.
    async fn find(&self, filter: &TermRelationshipFilter) -> PressResult<Vec<TermRelationship>>;
}
