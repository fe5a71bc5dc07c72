//! Component wiring.
//!
//! Two deployment shapes are supported:
//! - MySQL: repositories over a shared connection pool, built by
//!   [`PressModuleBuilder::connect`]
//! - In-memory: repositories over an [`InMemoryContentStore`], built by
//!   [`PressModuleBuilder::build_with`] and [`Repositories::in_memory`]

use crate::query_service::QueryService;
use crate::r#impl::QueryServiceImpl;
use crate::registry::{NamedQuery, QueryContext, QueryRegistry, QueryRegistryBuilder};
use press_config::{format_validation_errors, AppConfig, ConfigValidator, MediaConfig};
use press_core::{HealthCheck, HealthReport, PressError, PressResult};
use press_repository::{
    create_pool, DatabasePoolInterface, EntitySchema, InMemoryContentStore, MySqlPostMetaRepository,
    MySqlPostRepository, MySqlTableAccessor, MySqlTermRelationshipRepository, MySqlTermRepository,
    MySqlTermTaxonomyRepository, PostMetaRepository, PostRepository, TableAccessor, TableNames, TableRegistry,
    TermRelationshipRepository, TermRepository, TermTaxonomyRepository,
};
use std::sync::Arc;
use tracing::info;

/// The per-table repositories and the generic table accessor.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub postmeta: Arc<dyn PostMetaRepository>,
    pub terms: Arc<dyn TermRepository>,
    pub term_taxonomy: Arc<dyn TermTaxonomyRepository>,
    pub term_relationships: Arc<dyn TermRelationshipRepository>,
    pub tables: Arc<dyn TableAccessor>,
}

impl Repositories {
    /// Serves every table from one in-memory store.
    #[must_use]
    pub fn in_memory(store: Arc<InMemoryContentStore>) -> Self {
        Self {
            posts: store.clone(),
            postmeta: store.clone(),
            terms: store.clone(),
            term_taxonomy: store.clone(),
            term_relationships: store.clone(),
            tables: store,
        }
    }

    /// Builds MySQL repositories sharing one pool.
    #[must_use]
    pub fn mysql(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames, registry: Arc<TableRegistry>) -> Self {
        Self {
            posts: Arc::new(MySqlPostRepository::new(Arc::clone(&pool), tables.clone())),
            postmeta: Arc::new(MySqlPostMetaRepository::new(Arc::clone(&pool), tables.clone())),
            terms: Arc::new(MySqlTermRepository::new(Arc::clone(&pool), tables.clone())),
            term_taxonomy: Arc::new(MySqlTermTaxonomyRepository::new(Arc::clone(&pool), tables.clone())),
            term_relationships: Arc::new(MySqlTermRelationshipRepository::new(Arc::clone(&pool), tables.clone())),
            tables: Arc::new(MySqlTableAccessor::new(pool, tables, registry)),
        }
    }
}

/// Builds a [`PressModule`].
pub struct PressModuleBuilder {
    media: MediaConfig,
    schemas: Vec<EntitySchema>,
    queries: Vec<(String, Arc<dyn NamedQuery>)>,
}

impl Default for PressModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PressModuleBuilder {
    /// Creates a builder with default media settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            media: MediaConfig::default(),
            schemas: Vec::new(),
            queries: Vec::new(),
        }
    }

    /// Sets where attachment files are served from.
    #[must_use]
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    /// Declares an extra table readable through [`TableAccessor`].
    #[must_use]
    pub fn with_schema(mut self, schema: EntitySchema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Adds or replaces a named query.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, query: impl NamedQuery + 'static) -> Self {
        self.queries.push((name.into(), Arc::new(query)));
        self
    }

    /// Builds the table registry from the core and declared schemas.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for duplicate or malformed schemas.
    pub fn table_registry(&self) -> PressResult<Arc<TableRegistry>> {
        let mut registry = TableRegistry::with_core_schemas();
        for schema in &self.schemas {
            registry.register(schema.clone())?;
        }
        Ok(Arc::new(registry))
    }

    /// Connects to MySQL and wires the MySQL repositories.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for invalid settings and `Database` when the
    /// pool cannot be opened.
    pub async fn connect(mut self, config: &AppConfig) -> PressResult<PressModule> {
        ConfigValidator::validate(config)
            .map_err(|errors| PressError::Configuration(format_validation_errors(&errors)))?;

        let tables = TableNames::new(config.database.wp_prefix.clone())?;
        let registry = self.table_registry()?;
        let database = create_pool(&config.database).await?;
        let pool: Arc<dyn DatabasePoolInterface> = database.clone();
        info!(
            "Press module connected to {} with table prefix {}",
            config.database.display_target(),
            tables.prefix()
        );

        self.media = config.media.clone();
        let repositories = Repositories::mysql(Arc::clone(&pool), tables, registry);
        let mut module = self.assemble(repositories, Some(pool));
        module.health_checks.push(database);
        Ok(module)
    }

    /// Wires the service and registry over the given repositories.
    #[must_use]
    pub fn build_with(self, repositories: Repositories) -> PressModule {
        self.assemble(repositories, None)
    }

    fn assemble(self, repositories: Repositories, pool: Option<Arc<dyn DatabasePoolInterface>>) -> PressModule {
        let service: Arc<dyn QueryService> = Arc::new(QueryServiceImpl::new(&repositories, self.media));
        let context = QueryContext {
            service: Arc::clone(&service),
            repositories: repositories.clone(),
        };

        let mut builder = QueryRegistryBuilder::new(context);
        for (name, query) in self.queries {
            builder = builder.register_shared(name, query);
        }
        let registry = builder.build();
        info!("Press module ready with {} queries", registry.names().count());

        PressModule {
            service,
            registry,
            repositories,
            pool,
            health_checks: Vec::new(),
        }
    }
}

/// The wired query layer.
pub struct PressModule {
    service: Arc<dyn QueryService>,
    registry: QueryRegistry,
    repositories: Repositories,
    pool: Option<Arc<dyn DatabasePoolInterface>>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl PressModule {
    #[must_use]
    pub fn service(&self) -> Arc<dyn QueryService> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn registry(&self) -> &QueryRegistry {
        &self.registry
    }

    #[must_use]
    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    /// Probes the store connection. An in-memory module has nothing to probe.
    pub async fn health(&self) -> HealthReport {
        HealthReport::collect(&self.health_checks).await
    }

    /// Closes the connection pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Press module closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::query_fn;
    use press_core::{post_status, post_type, Post, PostId};
    use press_repository::{ColumnFilter, ColumnKind, FilterValue};
    use serde_json::{json, Map, Value};

    fn media() -> MediaConfig {
        MediaConfig {
            amazon_s3: false,
            upload_directory: "https://example.com/".to_string(),
        }
    }

    fn redirects() -> EntitySchema {
        EntitySchema::new("redirects", "redirection_items", "id")
            .column("id", ColumnKind::Unsigned)
            .column("url", ColumnKind::Text)
    }

    #[tokio::test]
    async fn test_build_with_in_memory_store() {
        let store = InMemoryContentStore::new();
        store.insert_post(Post::new(PostId::new(1), post_type::PAGE, post_status::PUBLISH));
        let module = PressModuleBuilder::new()
            .with_media(media())
            .build_with(Repositories::in_memory(Arc::new(store)));

        let pages = module
            .registry()
            .execute("posts", json!({ "post_type": "page" }))
            .await
            .unwrap();
        assert_eq!(pages.as_array().map(Vec::len), Some(1));
        assert!(module.service().get_post_by_id(PostId::new(1)).await.is_ok());
        assert!(module.health().await.status.is_healthy());
        module.close().await;
    }

    #[test]
    fn test_table_registry_with_extension() {
        let registry = PressModuleBuilder::new().with_schema(redirects()).table_registry().unwrap();
        assert!(registry.get("redirects").is_ok());
        assert!(registry.get("posts").is_ok());
    }

    #[test]
    fn test_duplicate_schema_rejected() {
        let result = PressModuleBuilder::new()
            .with_schema(redirects())
            .with_schema(redirects())
            .table_registry();
        assert!(matches!(result, Err(PressError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_extension_query_reads_declared_table() {
        let builder = PressModuleBuilder::new().with_schema(redirects()).with_query(
            "redirect",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let url = args["url"].as_str().unwrap_or_default().to_string();
                    let rows = ctx
                        .repositories
                        .tables
                        .select("redirects", &[ColumnFilter::eq("url", FilterValue::Text(url))])
                        .await?;
                    Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
                })
            }),
        );

        let store = InMemoryContentStore::with_registry(builder.table_registry().unwrap());
        let mut row = Map::new();
        row.insert("id".to_string(), json!(3));
        row.insert("url".to_string(), json!("/old"));
        store.insert_record("redirects", row).unwrap();

        let module = builder.build_with(Repositories::in_memory(Arc::new(store)));
        let found = module.registry().execute("redirect", json!({ "url": "/old" })).await.unwrap();
        assert_eq!(found, json!([{ "id": 3, "url": "/old" }]));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.database.wp_prefix = "bad prefix".to_string();

        let result = PressModuleBuilder::new().connect(&config).await;
        assert!(matches!(result, Err(PressError::Configuration(_))));
    }
}
