//! Per-table filters.
//!
//! Each filter is a conjunction of optional equality or membership
//! conditions. An id list that is present but empty matches nothing.
//! The same filter drives both the SQL builder and the in-memory store.

use press_core::{MetaId, Post, PostId, PostMeta, Term, TermId, TermRelationship, TermTaxonomy, TermTaxonomyId};

fn in_list<T: PartialEq>(list: Option<&Vec<T>>, value: &T) -> bool {
    list.map_or(true, |list| list.contains(value))
}

fn eq<T: PartialEq + ?Sized>(expected: Option<&T>, value: &T) -> bool {
    expected.map_or(true, |expected| expected == value)
}

/// Filter over the posts table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub ids: Option<Vec<PostId>>,
    pub post_status: Option<String>,
    pub post_type: Option<String>,
    pub post_name: Option<String>,
    pub post_parent: Option<PostId>,
    pub limit: Option<u32>,
}

impl PostFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(self, id: PostId) -> Self {
        self.ids(vec![id])
    }

    #[must_use]
    pub fn ids(mut self, ids: Vec<PostId>) -> Self {
        self.ids = Some(ids);
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.post_status = Some(status.into());
        self
    }

    #[must_use]
    pub fn post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = Some(post_type.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.post_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: PostId) -> Self {
        self.post_parent = Some(parent);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the filter can never match a row.
    #[must_use]
    pub fn is_empty_match(&self) -> bool {
        self.ids.as_ref().is_some_and(Vec::is_empty) || self.limit == Some(0)
    }

    /// Evaluates the filter against one row, ignoring `limit`.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        in_list(self.ids.as_ref(), &post.id)
            && eq(self.post_status.as_deref(), post.post_status.as_str())
            && eq(self.post_type.as_deref(), post.post_type.as_str())
            && eq(self.post_name.as_deref(), post.post_name.as_str())
            && eq(self.post_parent.as_ref(), &post.post_parent)
    }
}

/// Filter over the postmeta table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMetaFilter {
    pub meta_ids: Option<Vec<MetaId>>,
    pub post_ids: Option<Vec<PostId>>,
    pub meta_keys: Option<Vec<String>>,
}

impl PostMetaFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn meta_id(mut self, id: MetaId) -> Self {
        self.meta_ids = Some(vec![id]);
        self
    }

    #[must_use]
    pub fn post_id(self, id: PostId) -> Self {
        self.post_ids(vec![id])
    }

    #[must_use]
    pub fn post_ids(mut self, ids: Vec<PostId>) -> Self {
        self.post_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn key(self, key: impl Into<String>) -> Self {
        self.keys(vec![key.into()])
    }

    #[must_use]
    pub fn keys(mut self, keys: Vec<String>) -> Self {
        self.meta_keys = Some(keys);
        self
    }

    #[must_use]
    pub fn is_empty_match(&self) -> bool {
        self.meta_ids.as_ref().is_some_and(Vec::is_empty)
            || self.post_ids.as_ref().is_some_and(Vec::is_empty)
            || self.meta_keys.as_ref().is_some_and(Vec::is_empty)
    }

    /// Evaluates the filter against one row. A key filter never matches a NULL key.
    #[must_use]
    pub fn matches(&self, meta: &PostMeta) -> bool {
        let key_ok = match (&self.meta_keys, &meta.meta_key) {
            (None, _) => true,
            (Some(keys), Some(key)) => keys.contains(key),
            (Some(_), None) => false,
        };
        key_ok
            && in_list(self.meta_ids.as_ref(), &meta.meta_id)
            && in_list(self.post_ids.as_ref(), &meta.post_id)
    }
}

/// Filter over the terms table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFilter {
    pub term_ids: Option<Vec<TermId>>,
    pub slug: Option<String>,
}

impl TermFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn term_ids(mut self, ids: Vec<TermId>) -> Self {
        self.term_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn is_empty_match(&self) -> bool {
        self.term_ids.as_ref().is_some_and(Vec::is_empty)
    }

    #[must_use]
    pub fn matches(&self, term: &Term) -> bool {
        in_list(self.term_ids.as_ref(), &term.term_id) && eq(self.slug.as_deref(), term.slug.as_str())
    }
}

/// Filter over the term_taxonomy table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermTaxonomyFilter {
    pub ids: Option<Vec<TermTaxonomyId>>,
    pub term_ids: Option<Vec<TermId>>,
    pub taxonomy: Option<String>,
}

impl TermTaxonomyFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ids(mut self, ids: Vec<TermTaxonomyId>) -> Self {
        self.ids = Some(ids);
        self
    }

    #[must_use]
    pub fn term_ids(mut self, ids: Vec<TermId>) -> Self {
        self.term_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.taxonomy = Some(taxonomy.into());
        self
    }

    #[must_use]
    pub fn is_empty_match(&self) -> bool {
        self.ids.as_ref().is_some_and(Vec::is_empty) || self.term_ids.as_ref().is_some_and(Vec::is_empty)
    }

    #[must_use]
    pub fn matches(&self, row: &TermTaxonomy) -> bool {
        in_list(self.ids.as_ref(), &row.term_taxonomy_id)
            && in_list(self.term_ids.as_ref(), &row.term_id)
            && eq(self.taxonomy.as_deref(), row.taxonomy.as_str())
    }
}

/// Filter over the term_relationships table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermRelationshipFilter {
    pub object_ids: Option<Vec<PostId>>,
    pub term_taxonomy_ids: Option<Vec<TermTaxonomyId>>,
}

impl TermRelationshipFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn object_ids(mut self, ids: Vec<PostId>) -> Self {
        self.object_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn term_taxonomy_ids(mut self, ids: Vec<TermTaxonomyId>) -> Self {
        self.term_taxonomy_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn is_empty_match(&self) -> bool {
        self.object_ids.as_ref().is_some_and(Vec::is_empty)
            || self.term_taxonomy_ids.as_ref().is_some_and(Vec::is_empty)
    }

    #[must_use]
    pub fn matches(&self, row: &TermRelationship) -> bool {
        in_list(self.object_ids.as_ref(), &row.object_id)
            && in_list(self.term_taxonomy_ids.as_ref(), &row.term_taxonomy_id)
    }
}
