//! In-memory content store.
//!
//! Implements every repository trait and [`TableAccessor`] over plain maps.
//! Used by tests and by embedders that want to serve fixture content without
//! a database.

use crate::schema::check_filters;
use crate::{
    ColumnFilter, PostFilter, PostMetaFilter, PostMetaRepository, PostRepository, Record, TableAccessor,
    TableNames, TableRegistry, TermFilter, TermRelationshipFilter, TermRelationshipRepository, TermRepository,
    TermTaxonomyFilter, TermTaxonomyRepository,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use press_core::{
    MetaId, Post, PostId, PostMeta, PressError, PressResult, Term, TermId, TermRelationship, TermTaxonomy,
    TermTaxonomyId,
};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const ZERO_DATE: &str = "0000-00-00 00:00:00";

#[derive(Default)]
struct Tables {
    posts: BTreeMap<PostId, Post>,
    postmeta: BTreeMap<MetaId, PostMeta>,
    terms: BTreeMap<TermId, Term>,
    term_taxonomy: BTreeMap<TermTaxonomyId, TermTaxonomy>,
    term_relationships: BTreeMap<(PostId, TermTaxonomyId), TermRelationship>,
    extra: HashMap<String, Vec<Record>>,
}

/// Content store held entirely in memory.
pub struct InMemoryContentStore {
    tables: RwLock<Tables>,
    registry: Arc<TableRegistry>,
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContentStore {
    /// Creates an empty store knowing only the content tables.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Arc::new(TableRegistry::with_core_schemas()))
    }

    /// Creates an empty store validating generic reads against `registry`.
    #[must_use]
    pub fn with_registry(registry: Arc<TableRegistry>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            registry,
        }
    }

    /// Inserts or replaces a post.
    pub fn insert_post(&self, post: Post) {
        self.tables.write().posts.insert(post.id, post);
    }

    /// Inserts or replaces a meta row.
    pub fn insert_meta(&self, meta: PostMeta) {
        self.tables.write().postmeta.insert(meta.meta_id, meta);
    }

    pub fn insert_term(&self, term: Term) {
        self.tables.write().terms.insert(term.term_id, term);
    }

    pub fn insert_term_taxonomy(&self, row: TermTaxonomy) {
        self.tables.write().term_taxonomy.insert(row.term_taxonomy_id, row);
    }

    pub fn insert_relationship(&self, row: TermRelationship) {
        self.tables
            .write()
            .term_relationships
            .insert((row.object_id, row.term_taxonomy_id), row);
    }

    /// Appends a row to a declared extension entity.
    pub fn insert_record(&self, entity: &str, record: Record) -> PressResult<()> {
        let schema = self.registry.get(entity)?;
        if TYPED_ENTITIES.contains(&schema.name.as_str()) {
            return Err(PressError::Validation(format!(
                "Entity '{}' is backed by a typed table; use its insert method",
                entity
            )));
        }
        self.tables
            .write()
            .extra
            .entry(schema.name.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn core_records(&self, entity: &str) -> Option<Vec<Record>> {
        let tables = self.tables.read();
        let records = match entity {
            "posts" => tables.posts.values().map(post_record).collect(),
            "postmeta" => tables.postmeta.values().map(meta_record).collect(),
            "terms" => tables.terms.values().map(term_record).collect(),
            "term_taxonomy" => tables.term_taxonomy.values().map(term_taxonomy_record).collect(),
            "term_relationships" => tables.term_relationships.values().map(relationship_record).collect(),
            _ => return None,
        };
        Some(records)
    }
}

const TYPED_ENTITIES: &[&str] = &[
    TableNames::POSTS,
    TableNames::POSTMETA,
    TableNames::TERMS,
    TableNames::TERM_TAXONOMY,
    TableNames::TERM_RELATIONSHIPS,
];

fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map_or_else(|| ZERO_DATE.to_string(), |d| d.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn record<const N: usize>(fields: [(&str, Value); N]) -> Record {
    fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn post_record(post: &Post) -> Record {
    record([
        ("ID", post.id.get().into()),
        ("post_author", post.post_author.into()),
        ("post_date", format_date(post.post_date).into()),
        ("post_modified", format_date(post.post_modified).into()),
        ("post_title", post.post_title.clone().into()),
        ("post_content", post.post_content.clone().into()),
        ("post_excerpt", post.post_excerpt.clone().into()),
        ("post_status", post.post_status.clone().into()),
        ("post_type", post.post_type.clone().into()),
        ("post_name", post.post_name.clone().into()),
        ("post_parent", post.post_parent.get().into()),
        ("menu_order", post.menu_order.into()),
        ("guid", post.guid.clone().into()),
    ])
}

fn meta_record(meta: &PostMeta) -> Record {
    record([
        ("meta_id", meta.meta_id.get().into()),
        ("post_id", meta.post_id.get().into()),
        ("meta_key", meta.meta_key.clone().into()),
        ("meta_value", meta.meta_value.clone().into()),
    ])
}

fn term_record(term: &Term) -> Record {
    record([
        ("term_id", term.term_id.get().into()),
        ("name", term.name.clone().into()),
        ("slug", term.slug.clone().into()),
        ("term_group", term.term_group.into()),
    ])
}

fn term_taxonomy_record(row: &TermTaxonomy) -> Record {
    record([
        ("term_taxonomy_id", row.term_taxonomy_id.get().into()),
        ("term_id", row.term_id.get().into()),
        ("taxonomy", row.taxonomy.clone().into()),
        ("description", row.description.clone().into()),
        ("parent", row.parent.get().into()),
        ("count", row.count.into()),
    ])
}

fn relationship_record(row: &TermRelationship) -> Record {
    record([
        ("object_id", row.object_id.get().into()),
        ("term_taxonomy_id", row.term_taxonomy_id.get().into()),
        ("term_order", row.term_order.into()),
    ])
}

fn sort_key(value: Option<&Value>) -> (u8, i128, String) {
    match value {
        Some(Value::Number(n)) => {
            let n = n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from));
            (1, n.unwrap_or_default(), String::new())
        }
        Some(Value::String(s)) => (2, 0, s.clone()),
        _ => (0, 0, String::new()),
    }
}

#[async_trait]
impl PostRepository for InMemoryContentStore {
    async fn find(&self, filter: &PostFilter) -> PressResult<Vec<Post>> {
        let tables = self.tables.read();
        let limit = filter.limit.map_or(usize::MAX, |l| l as usize);
        Ok(tables
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostMetaRepository for InMemoryContentStore {
    async fn find(&self, filter: &PostMetaFilter) -> PressResult<Vec<PostMeta>> {
        let tables = self.tables.read();
        Ok(tables.postmeta.values().filter(|m| filter.matches(m)).cloned().collect())
    }
}

#[async_trait]
impl TermRepository for InMemoryContentStore {
    async fn find(&self, filter: &TermFilter) -> PressResult<Vec<Term>> {
        let tables = self.tables.read();
        Ok(tables.terms.values().filter(|t| filter.matches(t)).cloned().collect())
    }
}

#[async_trait]
impl TermTaxonomyRepository for InMemoryContentStore {
    async fn find(&self, filter: &TermTaxonomyFilter) -> PressResult<Vec<TermTaxonomy>> {
        let tables = self.tables.read();
        Ok(tables.term_taxonomy.values().filter(|t| filter.matches(t)).cloned().collect())
    }
}

#[async_trait]
impl TermRelationshipRepository for InMemoryContentStore {
    async fn find(&self, filter: &TermRelationshipFilter) -> PressResult<Vec<TermRelationship>> {
        let tables = self.tables.read();
        Ok(tables
            .term_relationships
            .values()
            .filter(|r| filter.matches(r))
            .copied()
            .collect())
    }
}

#[async_trait]
impl TableAccessor for InMemoryContentStore {
    fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    async fn select(&self, entity: &str, filters: &[ColumnFilter]) -> PressResult<Vec<Record>> {
        let schema = self.registry.get(entity)?;
        check_filters(schema, filters)?;

        let rows = match self.core_records(&schema.name) {
            Some(rows) => rows,
            None => self.tables.read().extra.get(&schema.name).cloned().unwrap_or_default(),
        };

        let mut selected: Vec<Record> = rows
            .into_iter()
            .filter(|row| {
                filters
                    .iter()
                    .all(|f| row.get(&f.column) == Some(&f.value.to_json()))
            })
            .map(|row| {
                schema
                    .columns
                    .iter()
                    .map(|c| (c.name.clone(), row.get(&c.name).cloned().unwrap_or(Value::Null)))
                    .collect::<Record>()
            })
            .collect();
        selected.sort_by_key(|row| sort_key(row.get(&schema.primary_key)));
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnKind, EntitySchema, FilterValue};
    use press_core::{post_status, post_type, MetaKeys};
    use serde_json::json;

    fn store() -> InMemoryContentStore {
        let store = InMemoryContentStore::new();
        store.insert_post(Post::new(PostId::new(3), post_type::POST, post_status::PUBLISH).with_name("third"));
        store.insert_post(Post::new(PostId::new(1), post_type::POST, post_status::PUBLISH).with_name("first"));
        store.insert_post(Post::new(PostId::new(2), post_type::POST, post_status::DRAFT).with_name("second"));
        store.insert_meta(PostMeta::new(MetaId::new(11), PostId::new(1), "b", "2"));
        store.insert_meta(PostMeta::new(MetaId::new(10), PostId::new(1), "a", "1"));
        store.insert_meta(PostMeta::new(MetaId::new(12), PostId::new(2), "a", "x"));
        store
    }

    #[tokio::test]
    async fn test_posts_ordered_by_id() {
        let store = store();
        let posts = PostRepository::find(&store, &PostFilter::new().status(post_status::PUBLISH))
            .await
            .unwrap();
        let ids: Vec<u64> = posts.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_post_limit() {
        let store = store();
        let posts = PostRepository::find(&store, &PostFilter::new().limit(2)).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(PostRepository::find_by_id(&store, PostId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_meta_for_post_with_keys() {
        let store = store();
        let keys: MetaKeys = ["a".to_string()].into_iter().collect();
        let rows = store.find_for_post(PostId::new(1), Some(&keys)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meta_id, MetaId::new(10));

        let all = store.find_for_post(PostId::new(1), None).await.unwrap();
        let ids: Vec<u64> = all.iter().map(|m| m.meta_id.get()).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_select_core_entity() {
        let store = store();
        let rows = store
            .select("posts", &[ColumnFilter::eq("post_status", FilterValue::Text("publish".into()))])
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["ID"], json!(1));
        assert_eq!(rows[0]["post_date"], json!(ZERO_DATE));
    }

    #[tokio::test]
    async fn test_select_rejects_undeclared_column() {
        let store = store();
        let err = store
            .select("posts", &[ColumnFilter::eq("post_password", FilterValue::Text(String::new()))])
            .await
            .unwrap_err();
        assert!(matches!(err, PressError::Validation(_)));

        let err = store.select("users", &[]).await.unwrap_err();
        assert!(matches!(err, PressError::Validation(_)));
    }

    #[tokio::test]
    async fn test_select_extension_entity() {
        let mut registry = TableRegistry::with_core_schemas();
        registry
            .register(
                EntitySchema::new("comments", "comments", "comment_ID")
                    .column("comment_ID", ColumnKind::Unsigned)
                    .column("comment_post_ID", ColumnKind::Unsigned)
                    .column("comment_content", ColumnKind::Text),
            )
            .unwrap();
        let store = InMemoryContentStore::with_registry(Arc::new(registry));

        for (id, post, content) in [(2, 1, "second"), (1, 1, "first"), (3, 9, "other")] {
            let record = json!({ "comment_ID": id, "comment_post_ID": post, "comment_content": content });
            store
                .insert_record("comments", record.as_object().cloned().unwrap())
                .unwrap();
        }

        let rows = store
            .select("comments", &[ColumnFilter::eq("comment_post_ID", FilterValue::Unsigned(1))])
            .await
            .unwrap();
        let contents: Vec<&str> = rows.iter().filter_map(|r| r["comment_content"].as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        assert!(store.insert_record("posts", Record::new()).is_err());
    }
}
