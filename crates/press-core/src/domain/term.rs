//! Taxonomy entities: terms, their namespaces, and their links to posts.

use crate::{PostId, TermId, TermTaxonomyId};
use serde::{Deserialize, Serialize};

/// Well-known taxonomy namespaces.
pub mod taxonomy {
    pub const CATEGORY: &str = "category";
    pub const POST_TAG: &str = "post_tag";
    /// Navigation menus; the term slug is the menu name.
    pub const NAV_MENU: &str = "nav_menu";
}

/// A row of the terms table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub term_id: TermId,
    pub name: String,
    pub slug: String,
    pub term_group: i64,
}

impl Term {
    #[must_use]
    pub fn new(term_id: TermId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            term_id,
            name: name.into(),
            slug: slug.into(),
            term_group: 0,
        }
    }
}

/// A row of the term_taxonomy table, binding a term to a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermTaxonomy {
    pub term_taxonomy_id: TermTaxonomyId,
    pub term_id: TermId,
    pub taxonomy: String,
    pub description: String,
    /// Parent term in hierarchical taxonomies, zero for none.
    pub parent: TermId,
    pub count: i64,
}

impl TermTaxonomy {
    #[must_use]
    pub fn new(term_taxonomy_id: TermTaxonomyId, term_id: TermId, taxonomy: impl Into<String>) -> Self {
        Self {
            term_taxonomy_id,
            term_id,
            taxonomy: taxonomy.into(),
            description: String::new(),
            parent: TermId::default(),
            count: 0,
        }
    }
}

/// A row of the term_relationships table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRelationship {
    pub object_id: PostId,
    pub term_taxonomy_id: TermTaxonomyId,
    pub term_order: i32,
}

impl TermRelationship {
    #[must_use]
    pub const fn new(object_id: PostId, term_taxonomy_id: TermTaxonomyId) -> Self {
        Self {
            object_id,
            term_taxonomy_id,
            term_order: 0,
        }
    }
}
