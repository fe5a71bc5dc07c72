//! MySQL posts and postmeta repositories.

use super::rows::{PostMetaRow, PostRow, POSTMETA_COLUMNS, POST_COLUMNS};
use super::select::Select;
use crate::{DatabasePoolInterface, PostFilter, PostMetaFilter, PostMetaRepository, PostRepository, TableNames};
use async_trait::async_trait;
use press_core::{Post, PostMeta, PressResult};
use std::sync::Arc;
use tracing::debug;

/// MySQL posts repository.
#[derive(Clone)]
pub struct MySqlPostRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    tables: TableNames,
}

impl MySqlPostRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl PostRepository for MySqlPostRepository {
    async fn find(&self, filter: &PostFilter) -> PressResult<Vec<Post>> {
        if filter.is_empty_match() {
            return Ok(Vec::new());
        }

        let mut select = Select::new(POST_COLUMNS, &self.tables.posts());
        select
            .is_in_opt("ID", filter.ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .eq_opt("post_status", filter.post_status.clone())
            .eq_opt("post_type", filter.post_type.clone())
            .eq_opt("post_name", filter.post_name.clone())
            .eq_opt("post_parent", filter.post_parent.map(|id| id.get()))
            .order_by("ID ASC")
            .limit(filter.limit);
        debug!("Finding posts: {}", select.sql());

        let rows: Vec<PostRow> = select.fetch_as(self.pool.inner()).await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }
}

/// MySQL postmeta repository.
#[derive(Clone)]
pub struct MySqlPostMetaRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    tables: TableNames,
}

impl MySqlPostMetaRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl PostMetaRepository for MySqlPostMetaRepository {
    async fn find(&self, filter: &PostMetaFilter) -> PressResult<Vec<PostMeta>> {
        if filter.is_empty_match() {
            return Ok(Vec::new());
        }

        let mut select = Select::new(POSTMETA_COLUMNS, &self.tables.postmeta());
        select
            .is_in_opt("meta_id", filter.meta_ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .is_in_opt("post_id", filter.post_ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .is_in_opt("meta_key", filter.meta_keys.clone())
            .order_by("meta_id ASC");
        debug!("Finding post meta: {}", select.sql());

        let rows: Vec<PostMetaRow> = select.fetch_as(self.pool.inner()).await?;
        Ok(rows.into_iter().map(PostMeta::from).collect())
    }
}
