//! Integration tests for the MySQL repositories.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use press_core::{meta_key, post_status, post_type, HealthCheck, MetaId, PostId, PressError, TermId, TermTaxonomyId};
use press_repository::{
    ColumnFilter, ColumnKind, EntitySchema, FilterValue, MySqlPostMetaRepository, MySqlPostRepository,
    MySqlTableAccessor, MySqlTermRelationshipRepository, MySqlTermRepository, MySqlTermTaxonomyRepository,
    PostFilter, PostMetaFilter, PostMetaRepository, PostRepository, TableAccessor, TableRegistry,
    TermRelationshipFilter, TermRelationshipRepository, TermRepository, TermTaxonomyFilter,
    TermTaxonomyRepository,
};
use std::sync::Arc;

async fn seeded(prefix: &str) -> TestDatabase {
    let db = TestDatabase::new(prefix).await;
    db.insert_post(3, post_type::POST, post_status::PUBLISH, "third", "Third", 0).await;
    db.insert_post(1, post_type::POST, post_status::PUBLISH, "first", "First", 0).await;
    db.insert_post(2, post_type::POST, post_status::DRAFT, "second", "Second", 0).await;
    db.insert_post(4, post_type::PAGE, post_status::PUBLISH, "about", "About", 0).await;
    db.insert_meta(10, 1, Some(meta_key::THUMBNAIL_ID), Some("5")).await;
    db.insert_meta(11, 1, Some("color"), Some("red")).await;
    db.insert_meta(12, 1, Some("color"), Some("blue")).await;
    db.insert_meta(13, 1, None, Some("orphan key")).await;
    db.insert_meta(14, 99, Some("color"), None).await;
    db.insert_term(7, "Main Menu", "main-menu").await;
    db.insert_term_taxonomy(70, 7, "nav_menu").await;
    db.insert_relationship(1, 70).await;
    db.insert_relationship(3, 70).await;
    db
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_posts_by_status_and_type() {
    let db = seeded("wp_").await;
    let repo = MySqlPostRepository::new(db.pool(), db.tables());

    let posts = repo
        .find(&PostFilter::new().status(post_status::PUBLISH).post_type(post_type::POST))
        .await
        .expect("Query failed");

    let ids: Vec<u64> = posts.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(posts[0].post_title, "First");
    assert!(posts[0].post_date.is_some());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_post_by_id_returns_drafts() {
    let db = seeded("wp_").await;
    let repo = MySqlPostRepository::new(db.pool(), db.tables());

    let draft = repo
        .find_by_id(PostId::new(2))
        .await
        .expect("Query failed")
        .expect("Post not found");
    assert_eq!(draft.post_status, post_status::DRAFT);

    assert!(repo.find_by_id(PostId::new(404)).await.expect("Query failed").is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_empty_id_list_short_circuits() {
    let db = seeded("wp_").await;
    let repo = MySqlPostRepository::new(db.pool(), db.tables());

    let posts = repo.find(&PostFilter::new().ids(vec![])).await.expect("Query failed");
    assert!(posts.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_post_meta_ordered_and_nullable() {
    let db = seeded("wp_").await;
    let repo = MySqlPostMetaRepository::new(db.pool(), db.tables());

    let rows = repo.find_for_post(PostId::new(1), None).await.expect("Query failed");
    let ids: Vec<u64> = rows.iter().map(|m| m.meta_id.get()).collect();
    assert_eq!(ids, vec![10, 11, 12, 13]);
    assert!(rows[3].meta_key.is_none());

    let colors = repo
        .find(&PostMetaFilter::new().key("color"))
        .await
        .expect("Query failed");
    assert_eq!(colors.len(), 3);
    assert!(colors[2].meta_value.is_none());

    let single = repo.find_by_id(MetaId::new(12)).await.expect("Query failed");
    assert_eq!(single.and_then(|m| m.meta_value).as_deref(), Some("blue"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_taxonomy_chain() {
    let db = seeded("wp_").await;
    let terms = MySqlTermRepository::new(db.pool(), db.tables());
    let taxonomies = MySqlTermTaxonomyRepository::new(db.pool(), db.tables());
    let relationships = MySqlTermRelationshipRepository::new(db.pool(), db.tables());

    let found = terms.find_by_slug("main-menu").await.expect("Query failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].term_id, TermId::new(7));

    let tt = taxonomies
        .find(&TermTaxonomyFilter::new().term_ids(vec![TermId::new(7)]).taxonomy("nav_menu"))
        .await
        .expect("Query failed");
    assert_eq!(tt.len(), 1);

    let rels = relationships
        .find(&TermRelationshipFilter::new().term_taxonomy_ids(vec![TermTaxonomyId::new(70)]))
        .await
        .expect("Query failed");
    let objects: Vec<u64> = rels.iter().map(|r| r.object_id.get()).collect();
    assert_eq!(objects, vec![1, 3]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_custom_prefix() {
    let db = seeded("site2_").await;
    let repo = MySqlPostRepository::new(db.pool(), db.tables());

    let posts = repo.find(&PostFilter::new().name("about")).await.expect("Query failed");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post_type, post_type::PAGE);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_table_accessor_reads_declared_columns() {
    let db = seeded("wp_").await;
    let mut registry = TableRegistry::with_core_schemas();
    registry
        .register(
            EntitySchema::new("post_colors", "postmeta", "meta_id")
                .column("meta_id", ColumnKind::Unsigned)
                .column("meta_value", ColumnKind::Text),
        )
        .expect("valid schema");
    let accessor = MySqlTableAccessor::new(db.pool(), db.tables(), Arc::new(registry));

    let rows = accessor
        .select(
            "posts",
            &[ColumnFilter::eq("post_status", FilterValue::Text("publish".to_string()))],
        )
        .await
        .expect("Query failed");
    let ids: Vec<u64> = rows.iter().filter_map(|r| r["ID"].as_u64()).collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert!(rows[0]["post_date"].is_string());

    let colors = accessor
        .select("post_colors", &[ColumnFilter::eq("meta_id", FilterValue::Unsigned(11))])
        .await
        .expect("Query failed");
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[0]["meta_value"], "red");

    let err = accessor.select("users", &[]).await.unwrap_err();
    assert!(matches!(err, PressError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let db = TestDatabase::new("wp_").await;
    db.pool().health_check().await.expect("Health check failed");

    let status = HealthCheck::check(db.database_pool().as_ref()).await;
    assert!(!status.is_unhealthy(), "unexpected status {:?}", status);
}
