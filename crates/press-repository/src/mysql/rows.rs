//! Database row representations and their column lists.

use chrono::NaiveDateTime;
use press_core::{
    MetaId, Post, PostId, PostMeta, Term, TermId, TermRelationship, TermTaxonomy, TermTaxonomyId,
};
use sqlx::FromRow;

/// Zero dates are legal in the store but not representable in chrono.
pub(crate) const POST_COLUMNS: &str = "ID AS id, post_author, \
    CAST(NULLIF(post_date, '0000-00-00 00:00:00') AS DATETIME) AS post_date, \
    CAST(NULLIF(post_modified, '0000-00-00 00:00:00') AS DATETIME) AS post_modified, \
    post_title, post_content, post_excerpt, post_status, post_type, post_name, \
    post_parent, menu_order, guid";

pub(crate) const POSTMETA_COLUMNS: &str = "meta_id, post_id, meta_key, meta_value";

pub(crate) const TERM_COLUMNS: &str = "term_id, name, slug, term_group";

pub(crate) const TERM_TAXONOMY_COLUMNS: &str =
    "term_taxonomy_id, term_id, taxonomy, description, parent, count";

pub(crate) const TERM_RELATIONSHIP_COLUMNS: &str = "object_id, term_taxonomy_id, term_order";

#[derive(Debug, FromRow)]
pub(crate) struct PostRow {
    id: u64,
    post_author: u64,
    post_date: Option<NaiveDateTime>,
    post_modified: Option<NaiveDateTime>,
    post_title: String,
    post_content: String,
    post_excerpt: String,
    post_status: String,
    post_type: String,
    post_name: String,
    post_parent: u64,
    menu_order: i32,
    guid: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id),
            post_author: row.post_author,
            post_date: row.post_date,
            post_modified: row.post_modified,
            post_title: row.post_title,
            post_content: row.post_content,
            post_excerpt: row.post_excerpt,
            post_status: row.post_status,
            post_type: row.post_type,
            post_name: row.post_name,
            post_parent: PostId::new(row.post_parent),
            menu_order: row.menu_order,
            guid: row.guid,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PostMetaRow {
    meta_id: u64,
    post_id: u64,
    meta_key: Option<String>,
    meta_value: Option<String>,
}

impl From<PostMetaRow> for PostMeta {
    fn from(row: PostMetaRow) -> Self {
        PostMeta {
            meta_id: MetaId::new(row.meta_id),
            post_id: PostId::new(row.post_id),
            meta_key: row.meta_key,
            meta_value: row.meta_value,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TermRow {
    term_id: u64,
    name: String,
    slug: String,
    term_group: i64,
}

impl From<TermRow> for Term {
    fn from(row: TermRow) -> Self {
        Term {
            term_id: TermId::new(row.term_id),
            name: row.name,
            slug: row.slug,
            term_group: row.term_group,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TermTaxonomyRow {
    term_taxonomy_id: u64,
    term_id: u64,
    taxonomy: String,
    description: String,
    parent: u64,
    count: i64,
}

impl From<TermTaxonomyRow> for TermTaxonomy {
    fn from(row: TermTaxonomyRow) -> Self {
        TermTaxonomy {
            term_taxonomy_id: TermTaxonomyId::new(row.term_taxonomy_id),
            term_id: TermId::new(row.term_id),
            taxonomy: row.taxonomy,
            description: row.description,
            parent: TermId::new(row.parent),
            count: row.count,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TermRelationshipRow {
    object_id: u64,
    term_taxonomy_id: u64,
    term_order: i32,
}

impl From<TermRelationshipRow> for TermRelationship {
    fn from(row: TermRelationshipRow) -> Self {
        TermRelationship {
            object_id: PostId::new(row.object_id),
            term_taxonomy_id: TermTaxonomyId::new(row.term_taxonomy_id),
            term_order: row.term_order,
        }
    }
}
