//! MySQL taxonomy repositories.

use super::rows::{
    TermRelationshipRow, TermRow, TermTaxonomyRow, TERM_COLUMNS, TERM_RELATIONSHIP_COLUMNS,
    TERM_TAXONOMY_COLUMNS,
};
use super::select::Select;
use crate::{
    DatabasePoolInterface, TableNames, TermFilter, TermRelationshipFilter, TermRelationshipRepository,
    TermRepository, TermTaxonomyFilter, TermTaxonomyRepository,
};
use async_trait::async_trait;
use press_core::{PressResult, Term, TermRelationship, TermTaxonomy};
use std::sync::Arc;
use tracing::debug;

/// MySQL terms repository.
#[derive(Clone)]
pub struct MySqlTermRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    tables: TableNames,
}

impl MySqlTermRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl TermRepository for MySqlTermRepository {
    async fn find(&self, filter: &TermFilter) -> PressResult<Vec<Term>> {
        if filter.is_empty_match() {
            return Ok(Vec::new());
        }

        let mut select = Select::new(TERM_COLUMNS, &self.tables.terms());
        select
            .is_in_opt("term_id", filter.term_ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .eq_opt("slug", filter.slug.clone())
            .order_by("term_id ASC");
        debug!("Finding terms: {}", select.sql());

        let rows: Vec<TermRow> = select.fetch_as(self.pool.inner()).await?;
        Ok(rows.into_iter().map(Term::from).collect())
    }
}

/// MySQL term_taxonomy repository.
#[derive(Clone)]
pub struct MySqlTermTaxonomyRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    tables: TableNames,
}

impl MySqlTermTaxonomyRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl TermTaxonomyRepository for MySqlTermTaxonomyRepository {
    async fn find(&self, filter: &TermTaxonomyFilter) -> PressResult<Vec<TermTaxonomy>> {
        if filter.is_empty_match() {
            return Ok(Vec::new());
        }

        let mut select = Select::new(TERM_TAXONOMY_COLUMNS, &self.tables.term_taxonomy());
        select
            .is_in_opt("term_taxonomy_id", filter.ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .is_in_opt("term_id", filter.term_ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .eq_opt("taxonomy", filter.taxonomy.clone())
            .order_by("term_taxonomy_id ASC");
        debug!("Finding term taxonomies: {}", select.sql());

        let rows: Vec<TermTaxonomyRow> = select.fetch_as(self.pool.inner()).await?;
        Ok(rows.into_iter().map(TermTaxonomy::from).collect())
    }
}

/// MySQL term_relationships repository.
#[derive(Clone)]
pub struct MySqlTermRelationshipRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    tables: TableNames,
}

impl MySqlTermRelationshipRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl TermRelationshipRepository for MySqlTermRelationshipRepository {
    async fn find(&self, filter: &TermRelationshipFilter) -> PressResult<Vec<TermRelationship>> {
        if filter.is_empty_match() {
            return Ok(Vec::new());
        }

        let mut select = Select::new(TERM_RELATIONSHIP_COLUMNS, &self.tables.term_relationships());
        select
            .is_in_opt("object_id", filter.object_ids.as_ref().map(|ids| ids.iter().map(|id| id.get())))
            .is_in_opt(
                "term_taxonomy_id",
                filter.term_taxonomy_ids.as_ref().map(|ids| ids.iter().map(|id| id.get())),
            )
            .order_by("object_id ASC, term_taxonomy_id ASC");
        debug!("Finding term relationships: {}", select.sql());

        let rows: Vec<TermRelationshipRow> = select.fetch_as(self.pool.inner()).await?;
        Ok(rows.into_iter().map(TermRelationship::from).collect())
    }
}
